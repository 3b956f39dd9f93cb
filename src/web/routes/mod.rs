pub mod announcements;
pub mod discovery;
pub mod health;
pub mod inventory;
pub mod listings;
pub mod location;
pub mod menu;
pub mod reviews;
pub mod subscriptions;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::warn;

// Services signal caller mistakes as Protocol and missing rows as RowNotFound;
// everything else is an internal failure.
pub(crate) fn error_response(err: sqlx::Error) -> (StatusCode, Json<Value>) {
    match err {
        sqlx::Error::Protocol(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))),
        sqlx::Error::RowNotFound => not_found(),
        e => {
            warn!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error" })),
            )
        }
    }
}

pub(crate) fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" })))
}
