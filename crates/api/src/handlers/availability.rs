//! Availability preview for the CMS editing widget.
//!
//! The studio widget that auto-fills a session's `availability` field calls
//! this endpoint instead of reimplementing the rule client-side, so the
//! editor and the webhook can never disagree on the derivation.

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use packleader_core::availability::{derive_availability, Availability};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewParams {
    #[serde(default)]
    pub total_spots: Option<i64>,
    #[serde(default)]
    pub bookings_count: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub bookings_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spots: Option<i64>,
    /// `null` when capacity tracking is off; the widget must then leave the
    /// stored value untouched and prompt the editor to set a capacity.
    pub availability: Option<Availability>,
}

/// GET /api/availability/preview
pub async fn preview_availability(Query(params): Query<PreviewParams>) -> Json<PreviewResponse> {
    let bookings_count = params.bookings_count.unwrap_or(0);
    let availability = derive_availability(params.total_spots, bookings_count);

    Json(PreviewResponse {
        bookings_count,
        total_spots: params.total_spots,
        availability,
    })
}
