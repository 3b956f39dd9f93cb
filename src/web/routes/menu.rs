use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::menu_service::{self, MenuSlotBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::{error_response, not_found};

pub async fn get_menu_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let menu = menu_service::get_menu(&pool, &listing_id)
        .await
        .map_err(error_response)?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "menu": menu })))
}

pub async fn upsert_menu_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<MenuSlotBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    menu_service::upsert_menu_slot(&pool, &auth_user.id, &listing_id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "status": "saved" })))
}

pub async fn delete_menu_item_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((listing_id, item_id)): Path<(String, String)>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let deleted = menu_service::remove_menu_item(&pool, &auth_user.id, &listing_id, &item_id)
        .await
        .map_err(error_response)?;
    if deleted == 0 {
        return Err(not_found());
    }

    Ok(Json(json!({ "status": "deleted" })))
}
