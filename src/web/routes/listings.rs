use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::listings_service::{self, CreateListingBody, UpdateListingBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::{error_response, not_found};

pub async fn create_listing_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateListingBody>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let listing = listings_service::create_listing(&pool, &auth_user.id, &body)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(json!({ "listing": listing }))))
}

pub async fn update_listing_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<UpdateListingBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let listing = listings_service::update_listing(&pool, &auth_user.id, &listing_id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "listing": listing })))
}

pub async fn listing_detail_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let detail = listings_service::build_listing_detail(&pool, &auth_user.id, &listing_id)
        .await
        .map_err(error_response)?
        .ok_or_else(not_found)?;

    Ok(Json(json!({
        "listing": detail.listing,
        "rating": detail.rating,
        "reviews": detail.reviews,
        "menu": detail.menu,
        "announcements": detail.announcements,
        "subscription_status": detail.subscription_status,
        "viewer_has_reviewed": detail.viewer_has_reviewed,
    })))
}
