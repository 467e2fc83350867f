pub mod availability;
pub mod health;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /acuity-webhook          inbound scheduling webhook
/// GET  /availability/preview    derived-availability preview (CMS widget)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(webhooks::router())
        .merge(availability::router())
}
