use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::discovery_service::{self, DiscoveryQuery};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::error_response;

pub async fn discovery_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<DiscoveryQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let page = discovery_service::build_discovery_page(&pool, &query)
        .await
        .map_err(error_response)?;

    let count = page.listings.len();
    Ok(Json(json!({
        "count": count,
        "listings": page.listings,
        "filters": page.filters,
        "viewer": page.viewer,
    })))
}
