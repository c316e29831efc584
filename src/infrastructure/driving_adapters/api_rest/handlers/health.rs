//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::infrastructure::driving_adapters::api_rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
