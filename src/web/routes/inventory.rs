use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::inventory_service::{self, InventoryItemBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::{error_response, not_found};

pub async fn get_inventory_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let inventory = inventory_service::get_inventory(&pool, &auth_user.id, &listing_id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "inventory": inventory })))
}

pub async fn upsert_inventory_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<InventoryItemBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    inventory_service::upsert_inventory_item(&pool, &auth_user.id, &listing_id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "status": "saved" })))
}

pub async fn delete_inventory_item_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((listing_id, item_id)): Path<(String, String)>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let deleted =
        inventory_service::remove_inventory_item(&pool, &auth_user.id, &listing_id, &item_id)
            .await
            .map_err(error_response)?;
    if deleted == 0 {
        return Err(not_found());
    }

    Ok(Json(json!({ "status": "deleted" })))
}
