use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether webhook signature verification is enforced.
    pub signature_verification: bool,
}

/// GET /health -- returns service status and signature-verification state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let signature_verification =
        state.config.acuity_api_key.is_some() && !state.config.development;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        signature_verification,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
