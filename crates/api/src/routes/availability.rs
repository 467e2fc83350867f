use axum::routing::get;
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/availability/preview",
        get(availability::preview_availability),
    )
}
