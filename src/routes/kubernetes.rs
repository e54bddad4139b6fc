//! Kubernetes probe routes.
//!
//! `/liveness` answers "is the process responsive" and always returns 200 as
//! long as the event loop services requests; a failing probe gets the pod
//! killed and recreated. `/healthz` additionally consults the readiness gate
//! when enabled.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::db::DbStatus;
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/liveness", get(liveness))
        .route("/healthz", get(healthz))
}

async fn liveness() -> StatusCode {
    StatusCode::OK
}

async fn healthz(State(state): State<AppState>) -> StatusCode {
    if state.config.readiness.require_database
        && *state.db_status.borrow() != DbStatus::Connected
    {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}
