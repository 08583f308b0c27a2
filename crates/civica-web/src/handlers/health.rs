use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: gateway liveness, independent of the agent service.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "civica-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
