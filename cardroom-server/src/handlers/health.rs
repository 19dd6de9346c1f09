use axum::Json;
use serde_json::{json, Value};

#[tracing::instrument]
pub async fn handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
