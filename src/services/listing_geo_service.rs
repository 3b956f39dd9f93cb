use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;
use tracing::warn;

use crate::database::listings_repo;
use crate::services::location_service;

#[derive(Debug, Default)]
pub struct ListingGeoBackfillReport {
    pub candidates: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub async fn backfill_listing_geo(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<ListingGeoBackfillReport> {
    let candidates = listings_repo::list_listings_missing_geo(pool, limit).await?;
    let mut report = ListingGeoBackfillReport {
        candidates: candidates.len(),
        ..Default::default()
    };

    // Listings in one street share geocoder answers within a run.
    let mut cache: HashMap<String, (f64, f64)> = HashMap::new();

    for row in candidates {
        let queries = build_queries(&row.address, &row.name);

        let mut chosen: Option<(f64, f64)> = None;
        for query in queries {
            let cache_key = query.to_lowercase();
            if let Some(coords) = cache.get(&cache_key).copied() {
                chosen = Some(coords);
                break;
            }

            let coords = match location_service::search_locations_upstream(&query, 3).await {
                Ok(results) => results.first().map(|r| (r.latitude, r.longitude)),
                // Upstream is down; stop trying alternates for this row.
                Err(_) => break,
            };

            if let Some((lat, lng)) = coords {
                cache.insert(cache_key, (lat, lng));
                chosen = Some((lat, lng));
                break;
            }
        }

        let Some((lat, lng)) = chosen else {
            warn!(
                "📍 No coords found for listing {} (name='{}')",
                row.listing_id, row.name
            );
            report.failed += 1;
            continue;
        };

        // A (0,0) answer would just recreate the sentinel; leave the row as is.
        if lat == 0.0 && lng == 0.0 {
            report.skipped += 1;
            continue;
        }

        let updated = listings_repo::update_listing_geo(pool, &row.listing_id, lat, lng).await?;
        if updated > 0 {
            report.updated += 1;
        } else {
            report.failed += 1;
        }
    }

    info!(
        "📍 Listing geo backfill done: candidates={}, updated={}, skipped={}, failed={}",
        report.candidates, report.updated, report.skipped, report.failed
    );

    Ok(report)
}

// Queries run from most to least specific: the full address, its trailing
// area segments, then the listing name as a last resort.
fn build_queries(address: &str, fallback_name: &str) -> Vec<String> {
    let segments: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut queries = Vec::new();
    let full = address.trim();
    if !full.is_empty() {
        queries.push(full.to_string());
    }
    if segments.len() >= 2 {
        queries.push(segments[segments.len() - 2..].join(" "));
    }
    if let Some(last) = segments.last() {
        queries.push((*last).to_string());
    }
    if queries.is_empty() {
        queries.push(fallback_name.to_string());
    }

    let mut seen = std::collections::HashSet::new();
    queries
        .into_iter()
        .filter(|q| seen.insert(q.to_lowercase()))
        .collect()
}
