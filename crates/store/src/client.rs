//! Sanity HTTP API client and the [`ContentStore`] trait it implements.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::models::{ClassDoc, SessionPatch};

/// HTTP request timeout for a single store round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GROQ query selecting class documents that carry a session with the given
/// external id. Filtering happens store-side so the handler never pages
/// through every class document.
const SESSION_QUERY: &str = r#"*[_type == "class" && count(upcomingClasses[acuityId == $acuityId]) > 0]{
  _id,
  upcomingClasses[]{
    _key,
    acuityId,
    bookingsCount,
    totalSpots
  }
}"#;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for content-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("Content store returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// ContentStore trait
// ---------------------------------------------------------------------------

/// The two store operations the webhook needs.
///
/// Handlers hold `Arc<dyn ContentStore>` so tests can swap in an in-memory
/// implementation and assert which mutations were (or were not) issued.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the class documents whose session collections reference the
    /// given Acuity appointment-type id, each with its full session list.
    async fn fetch_classes_with_session(&self, acuity_id: &str)
        -> Result<Vec<ClassDoc>, StoreError>;

    /// Write a session's new booking count (and availability, when present)
    /// back to its exact nested position, as a single patch on the owning
    /// document.
    async fn patch_session(&self, patch: &SessionPatch) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// SanityStore
// ---------------------------------------------------------------------------

/// Production [`ContentStore`] over the Sanity HTTP API.
pub struct SanityStore {
    client: reqwest::Client,
    config: StoreConfig,
}

/// Envelope for Sanity query responses.
#[derive(Deserialize)]
struct QueryResponse {
    result: Vec<ClassDoc>,
}

impl SanityStore {
    /// Create a store client with a pre-configured HTTP client.
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn endpoint(&self, kind: &str) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data/{}/{}",
            self.config.project_id, self.config.api_version, kind, self.config.dataset
        )
    }

    /// Read the response body of a failed request for the error message,
    /// falling back to an empty string if the body cannot be read.
    async fn error_for_status(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::HttpStatus { status, body }
    }
}

/// Build the Sanity mutation payload for a session patch.
///
/// The session is addressed by its internal `_key`; when `availability` is
/// `None` (capacity tracking off) only the booking count is written, leaving
/// any editor-set availability untouched.
fn mutation_payload(patch: &SessionPatch) -> serde_json::Value {
    let bookings_path = format!(
        "upcomingClasses[_key==\"{}\"].bookingsCount",
        patch.session_key
    );

    let mut set = serde_json::Map::new();
    set.insert(bookings_path, serde_json::json!(patch.bookings_count));

    if let Some(availability) = patch.availability {
        let availability_path = format!(
            "upcomingClasses[_key==\"{}\"].availability",
            patch.session_key
        );
        set.insert(availability_path, serde_json::json!(availability));
    }

    serde_json::json!({
        "mutations": [
            {
                "patch": {
                    "id": patch.doc_id,
                    "set": set,
                }
            }
        ]
    })
}

#[async_trait]
impl ContentStore for SanityStore {
    async fn fetch_classes_with_session(
        &self,
        acuity_id: &str,
    ) -> Result<Vec<ClassDoc>, StoreError> {
        let body = serde_json::json!({
            "query": SESSION_QUERY,
            "params": { "acuityId": acuity_id },
        });

        let response = self
            .client
            .post(self.endpoint("query"))
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(parsed.result)
    }

    async fn patch_session(&self, patch: &SessionPatch) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.endpoint("mutate"))
            .bearer_auth(&self.config.token)
            .json(&mutation_payload(patch))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        tracing::info!(
            doc_id = %patch.doc_id,
            session_key = %patch.session_key,
            bookings_count = patch.bookings_count,
            availability = ?patch.availability,
            "Patched session booking state"
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
