//! Inbound Acuity Scheduling webhook.
//!
//! Acuity POSTs a form-encoded body (`action`, `appointmentTypeID`) whenever
//! an appointment is scheduled or canceled. The handler verifies the request
//! signature, locates the matching class session by its Acuity id, bumps the
//! booking counter, recomputes the derived availability, and writes both
//! fields back to the content store as a single patch.
//!
//! To set up in Acuity: Settings > Integrations > Webhooks, point the URL at
//! `/api/acuity-webhook` and select the "Appointment Scheduled" and
//! "Appointment Canceled" events. `ACUITY_API_KEY` must match the account
//! API key; Acuity sends the `x-acuity-signature` header with each delivery.
//!
//! Deliveries carry no event id, so replays are not deduplicated: the same
//! `scheduled` payload delivered twice counts two bookings.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use packleader_core::availability::{derive_availability, Availability};
use packleader_core::booking::BookingAction;
use packleader_core::signature::verify_signature;
use packleader_store::{find_session_by_acuity_id, SessionPatch};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the base64 HMAC-SHA256 signature of the raw body.
const SIGNATURE_HEADER: &str = "x-acuity-signature";

/// Form fields Acuity sends with each webhook delivery.
#[derive(Debug, Deserialize)]
struct WebhookForm {
    #[serde(default)]
    action: Option<String>,
    #[serde(rename = "appointmentTypeID", default)]
    appointment_type_id: Option<String>,
}

/// Webhook response body. Accepted deliveries always report `success: true`;
/// the mutation fields are present only when a session was actually updated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(rename = "appointmentTypeID", skip_serializing_if = "Option::is_none")]
    pub appointment_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl WebhookResponse {
    fn accepted(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            action: None,
            appointment_type_id: None,
            bookings_count: None,
            total_spots: None,
            availability: None,
        }
    }
}

/// POST /api/acuity-webhook
///
/// Terminal outcomes: 200 (with or without a mutation), 401 (signature
/// rejected), 400 (missing required field), 500 (store failure).
pub async fn acuity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    // Signature check runs on the raw bytes, before any parsing. With a
    // configured secret outside development mode the header is mandatory; in
    // development a supplied signature is still verified (useful when testing
    // against real deliveries) but an absent one is tolerated.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Some(secret) = state.config.acuity_api_key.as_deref() {
        match signature {
            Some(sig) => {
                if !verify_signature(secret, &body, sig) {
                    tracing::warn!("Invalid webhook signature");
                    return Err(AppError::Unauthorized);
                }
            }
            None if !state.config.development => {
                tracing::warn!("Missing webhook signature");
                return Err(AppError::Unauthorized);
            }
            None => {}
        }
    }

    let form: WebhookForm = serde_urlencoded::from_bytes(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}")))?;

    // Only scheduled and canceled mutate; everything else is acknowledged
    // and dropped. This is not an error path.
    let action = match form.action.as_deref().and_then(BookingAction::parse) {
        Some(action) => action,
        None => {
            let name = form.action.as_deref().unwrap_or("none");
            return Ok(Json(WebhookResponse::accepted(format!(
                "Action {name} ignored"
            ))));
        }
    };

    let appointment_type_id = form
        .appointment_type_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing appointmentTypeID".into()))?;

    // The store filters server-side by the nested Acuity id; the first
    // matching session in document order wins if the id is not unique.
    let docs = state
        .store
        .fetch_classes_with_session(&appointment_type_id)
        .await?;

    let Some(found) = find_session_by_acuity_id(&docs, &appointment_type_id) else {
        tracing::warn!(
            appointment_type_id = %appointment_type_id,
            "No class session found for webhook"
        );
        return Ok(Json(WebhookResponse::accepted("Class not found".into())));
    };

    let new_bookings = action.apply(found.session.current_bookings());
    let total_spots = found.session.total_spots;

    // None means capacity tracking is off for this session: the stored
    // availability (possibly editor-set) is left untouched.
    let availability = derive_availability(total_spots, new_bookings);

    state
        .store
        .patch_session(&SessionPatch {
            doc_id: found.doc_id.to_string(),
            session_key: found.session.key.clone(),
            bookings_count: new_bookings,
            availability,
        })
        .await?;

    tracing::info!(
        doc_id = %found.doc_id,
        action = %action,
        bookings_count = new_bookings,
        total_spots = ?total_spots,
        availability = ?availability,
        "Updated class session from webhook"
    );

    Ok(Json(WebhookResponse {
        success: true,
        message: None,
        action: Some(action.as_str()),
        appointment_type_id: Some(appointment_type_id),
        bookings_count: Some(new_bookings),
        total_spots,
        availability,
    }))
}
