//! Public (unauthenticated) routes.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/test", get(endpoint_test))
}

/// Smoke-test endpoint reachable without credentials.
async fn endpoint_test() -> Json<Value> {
    Json(json!({ "desc": "UNAUTHENTICATED PUBLIC endpoint test" }))
}
