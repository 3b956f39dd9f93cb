use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::services::subscriptions_service;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::error_response;

#[derive(Debug, Deserialize)]
pub struct SubscriptionCommandBody {
    pub action: String,
}

pub async fn subscription_command_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<SubscriptionCommandBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let notice = subscriptions_service::create_subscription_command(
        &pool,
        &auth_user.id,
        &listing_id,
        &body.action,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(json!({ "status": notice })))
}

pub async fn my_subscriptions_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let subscriptions = subscriptions_service::list_user_subscriptions(&pool, &auth_user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "subscriptions": subscriptions })))
}

pub async fn listing_customers_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let customers =
        subscriptions_service::list_listing_customers(&pool, &auth_user.id, &listing_id)
            .await
            .map_err(error_response)?;

    Ok(Json(json!({ "customers": customers })))
}
