use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::reviews_service;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::{error_response, not_found};

pub async fn list_reviews_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let reviews = reviews_service::list_reviews(&pool, &listing_id)
        .await
        .map_err(error_response)?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "reviews": reviews })))
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewBody {
    pub rating: i64,
    pub comment: Option<String>,
}

pub async fn submit_review_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<SubmitReviewBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let outcome = reviews_service::submit_review(
        &pool,
        &listing_id,
        &auth_user.id,
        body.rating,
        body.comment.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok(Json(json!({ "status": outcome.as_str() })))
}
