use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize, Clone)]
pub struct LocationResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct Geo {
    lat: Option<f64>,
    lng: Option<f64>,
}

// Geocoder deployments disagree on field names; accept every spelling and
// normalize below.
#[derive(Debug, Deserialize)]
struct LocationHit {
    id: Option<String>,
    name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "_geo")]
    geo: Option<Geo>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Option<Vec<LocationHit>>,
}

pub async fn search_locations_upstream(q: &str, limit: usize) -> Result<Vec<LocationResult>, ()> {
    let q = q.trim();
    if q.len() < 2 {
        return Ok(Vec::new());
    }

    let limit = limit.clamp(1, 20);
    let base_url =
        std::env::var("GEOCODER_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let api_key = std::env::var("GEOCODER_API_KEY").ok();

    let url = format!("{}/search", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let mut req = client
        .get(&url)
        .query(&[("q", q), ("limit", &limit.to_string())]);

    if let Some(key) = api_key {
        req = req.header("x-api-key", key);
    }

    let resp = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("📍 Geocoder unreachable: {}", e);
            return Err(());
        }
    };

    if !resp.status().is_success() {
        warn!("📍 Geocoder returned non-OK: {}", resp.status());
        return Err(());
    }

    let parsed: SearchResponse = match resp.json().await {
        Ok(data) => data,
        Err(e) => {
            warn!("📍 Geocoder response parse failed: {}", e);
            return Err(());
        }
    };

    let hits = parsed.hits.unwrap_or_default();
    let results = hits
        .into_iter()
        .filter_map(|hit| {
            // A hit without usable coordinates is worthless here; drop it.
            let geo_lat = hit.geo.as_ref().and_then(|g| g.lat);
            let geo_lng = hit.geo.as_ref().and_then(|g| g.lng);
            let lat = geo_lat.or(hit.lat).or(hit.latitude)?;
            let lon = geo_lng.or(hit.lon).or(hit.longitude)?;

            Some(LocationResult {
                id: hit.id.unwrap_or_default(),
                name: hit.name.or(hit.display_name.clone()).unwrap_or_default(),
                description: hit.description.or(hit.display_name).unwrap_or_default(),
                latitude: lat,
                longitude: lon,
            })
        })
        .collect::<Vec<_>>();

    Ok(results)
}
