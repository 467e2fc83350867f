use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/acuity-webhook", post(webhooks::acuity_webhook))
}
