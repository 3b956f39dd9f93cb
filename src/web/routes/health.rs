use axum::Json;
use serde_json::{json, Value};

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": "messmate",
        "version": env!("CARGO_PKG_VERSION"),
        "build_id": env!("MESSMATE_BUILD_ID"),
    }))
}
