// Discovery: turns the full listing set, the review-derived ratings, an
// optional viewer position and the query-string filters into the ordered
// list of mess cards. The filtering/ranking itself is pure and synchronous;
// only the candidate loading touches the database.
use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::{listings_repo, reviews_repo};
use crate::models::{ListingRow, ReviewRatingRow};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

// (0,0) doubles as "never geocoded" in the listings table; such rows get this
// fixed distance so they sort last and fall outside any realistic radius.
pub const UNGEOCODED_DISTANCE_KM: f64 = 999.0;

// Listings without a single review rank as 4.5 for the minimum-rating filter
// so new messes are not invisible until someone rates them.
pub const DEFAULT_UNRATED_RATING: f64 = 4.5;

pub const DEFAULT_RADIUS_KM: f64 = 25.0;
pub const RATING_SCALE_MIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: i64,
    pub average: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct DiscoveryQuery {
    pub q: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub radius_km: Option<f64>,
    pub veg: Option<bool>,
    pub nonveg: Option<bool>,
    pub min_rating: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

// Effective filters after defaults are applied; echoed back in the response.
#[derive(Debug, Clone, Serialize)]
pub struct FilterCriteria {
    pub search_query: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub radius_km: f64,
    pub veg_only: bool,
    pub non_veg_only: bool,
    pub min_rating: f64,
}

pub struct DiscoveryPageData {
    pub listings: Vec<ListingRow>,
    pub filters: FilterCriteria,
    pub viewer: Option<Coordinates>,
}

pub async fn build_discovery_page(
    pool: &SqlitePool,
    query: &DiscoveryQuery,
) -> sqlx::Result<DiscoveryPageData> {
    let (criteria, viewer) = merge_filters(query);

    let rows = listings_repo::load_discovery_candidates(pool).await?;
    let rating_rows = reviews_repo::list_rating_rows(pool).await?;
    let ratings = aggregate_ratings(&rating_rows);

    let listings = discover(rows, &ratings, viewer, &criteria);

    Ok(DiscoveryPageData {
        listings,
        filters: criteria,
        viewer,
    })
}

// The viewer position only exists when both coordinates came through; a lone
// lat or lng is treated as "no fix", never as 0.
fn merge_filters(query: &DiscoveryQuery) -> (FilterCriteria, Option<Coordinates>) {
    let criteria = FilterCriteria {
        search_query: query.q.clone().unwrap_or_default(),
        price_min: query.price_min,
        price_max: query.price_max,
        radius_km: query.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
        veg_only: query.veg.unwrap_or(false),
        non_veg_only: query.nonveg.unwrap_or(false),
        min_rating: query.min_rating.unwrap_or(RATING_SCALE_MIN),
    };

    let viewer = query
        .lat
        .zip(query.lng)
        .map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        });

    (criteria, viewer)
}

// Core filter/ranking pass. Every predicate is ANDed; a malformed range
// (price_min > price_max, min_rating above the scale) simply matches nothing.
// Output is always a subset of the input, in input order unless a viewer
// position enables the distance sort.
pub fn discover(
    listings: Vec<ListingRow>,
    ratings: &HashMap<String, RatingSummary>,
    viewer: Option<Coordinates>,
    criteria: &FilterCriteria,
) -> Vec<ListingRow> {
    let term = criteria.search_query.trim().to_lowercase();

    let mut results = Vec::new();
    for mut listing in listings {
        if !term.is_empty()
            && !listing.name.to_lowercase().contains(&term)
            && !listing.address.to_lowercase().contains(&term)
        {
            continue;
        }

        if let Some(min) = criteria.price_min {
            if listing.price_monthly < min {
                continue;
            }
        }
        if let Some(max) = criteria.price_max {
            if listing.price_monthly > max {
                continue;
            }
        }

        if let Some(viewer) = viewer {
            let dist = haversine_km(
                viewer,
                Coordinates {
                    latitude: listing.latitude,
                    longitude: listing.longitude,
                },
            );
            if dist > criteria.radius_km {
                continue;
            }
            listing.distance_km = Some(dist);
        }

        if criteria.veg_only && !listing.is_vegetarian {
            continue;
        }
        if criteria.non_veg_only && !listing.is_non_vegetarian {
            continue;
        }

        let summary = ratings.get(&listing.listing_id).copied();
        let effective = summary.map_or(DEFAULT_UNRATED_RATING, |s| s.average);
        if effective < criteria.min_rating {
            continue;
        }
        listing.avg_rating = summary.map(|s| s.average);
        listing.rating_count = summary.map_or(0, |s| s.count);

        results.push(listing);
    }

    // Vec::sort_by is stable, so equal distances keep their input order.
    if viewer.is_some() {
        results.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::MAX)
                .partial_cmp(&b.distance_km.unwrap_or(f64::MAX))
                .unwrap_or(Ordering::Equal)
        });
    }

    results
}

// Mean rating per listing, rounded half-up to one decimal. Listings without
// reviews are simply absent from the map.
pub fn aggregate_ratings(reviews: &[ReviewRatingRow]) -> HashMap<String, RatingSummary> {
    let mut sums: HashMap<String, (i64, i64)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.listing_id.clone()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += review.rating;
    }

    sums.into_iter()
        .map(|(listing_id, (count, total))| {
            let summary = RatingSummary {
                count,
                average: round_half_up_1dp(total as f64 / count as f64),
            };
            (listing_id, summary)
        })
        .collect()
}

// f64::round is half-away-from-zero, which is half-up for ratings (all > 0).
fn round_half_up_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    if is_ungeocoded(from) || is_ungeocoded(to) {
        return UNGEOCODED_DISTANCE_KM;
    }

    let to_rad = |deg: f64| deg.to_radians();
    let dlat = to_rad(to.latitude - from.latitude);
    let dlon = to_rad(to.longitude - from.longitude);
    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(from.latitude).cos() * to_rad(to.latitude).cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

fn is_ungeocoded(point: Coordinates) -> bool {
    point.latitude == 0.0 && point.longitude == 0.0
}
