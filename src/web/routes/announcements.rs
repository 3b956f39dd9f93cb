use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::announcements_service;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::{error_response, not_found};

pub async fn list_announcements_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let announcements = announcements_service::list_announcements(&pool, &listing_id)
        .await
        .map_err(error_response)?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "announcements": announcements })))
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementBody {
    pub body: String,
}

pub async fn post_announcement_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<AnnouncementBody>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    announcements_service::post_announcement(&pool, &auth_user.id, &listing_id, &body.body)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(json!({ "status": "posted" }))))
}
