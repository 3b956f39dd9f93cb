use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::location_service;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct LocationSearchQuery {
    q: Option<String>,
    limit: Option<usize>,
}

pub async fn search_locations_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<LocationSearchQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| s.len() >= 2)
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "query too short" })),
        ))?;

    let limit = query.limit.unwrap_or(8).min(20);
    let results = location_service::search_locations_upstream(q, limit)
        .await
        .map_err(|_| {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "geocoder_unavailable" })),
            )
        })?;

    Ok(Json(json!({ "results": results })))
}
