use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use packleader_api::config::ServerConfig;
use packleader_api::routes;
use packleader_api::state::AppState;
use packleader_store::{ClassDoc, ClassSession, ContentStore, SessionPatch, StoreError};

/// Shared secret used by the production-mode test config.
pub const TEST_SECRET: &str = "test-acuity-key";

// ---------------------------------------------------------------------------
// In-memory content store
// ---------------------------------------------------------------------------

/// In-memory [`ContentStore`] that records every patch it receives and
/// applies it to its documents, so replayed deliveries observe the updated
/// booking count just like the real store.
pub struct RecordingStore {
    docs: Mutex<Vec<ClassDoc>>,
    pub patches: Mutex<Vec<SessionPatch>>,
    fail_fetch: bool,
}

impl RecordingStore {
    pub fn new(docs: Vec<ClassDoc>) -> Self {
        Self {
            docs: Mutex::new(docs),
            patches: Mutex::new(Vec::new()),
            fail_fetch: false,
        }
    }

    /// A store whose fetch always fails, for exercising the 500 path.
    pub fn failing() -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
            patches: Mutex::new(Vec::new()),
            fail_fetch: true,
        }
    }

    pub fn patch_count(&self) -> usize {
        self.patches.lock().unwrap().len()
    }

    pub fn last_patch(&self) -> Option<SessionPatch> {
        self.patches.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentStore for RecordingStore {
    async fn fetch_classes_with_session(
        &self,
        acuity_id: &str,
    ) -> Result<Vec<ClassDoc>, StoreError> {
        if self.fail_fetch {
            return Err(StoreError::HttpStatus {
                status: 503,
                body: "store unavailable".into(),
            });
        }

        // Mirror the server-side GROQ filter: only documents carrying a
        // session with the requested id are returned, with all sessions.
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .iter()
            .filter(|doc| {
                doc.sessions
                    .iter()
                    .any(|s| s.acuity_id.as_deref() == Some(acuity_id))
            })
            .cloned()
            .collect())
    }

    async fn patch_session(&self, patch: &SessionPatch) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().unwrap();
        if let Some(session) = docs
            .iter_mut()
            .filter(|doc| doc.id == patch.doc_id)
            .flat_map(|doc| doc.sessions.iter_mut())
            .find(|s| s.key == patch.session_key)
        {
            session.bookings_count = Some(patch.bookings_count);
        }

        self.patches.lock().unwrap().push(patch.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Class documents used across the webhook tests:
///
/// - `class-puppy-101`, session `sess-1` (acuity `123`): 3 of 5 booked.
/// - `class-puppy-101`, session `sess-2` (acuity `789`): 0 of 5 booked.
/// - `class-agility`, session `sess-3` (acuity `456`): capacity tracking off.
pub fn seed_docs() -> Vec<ClassDoc> {
    vec![
        ClassDoc {
            id: "class-puppy-101".into(),
            sessions: vec![
                ClassSession {
                    key: "sess-1".into(),
                    acuity_id: Some("123".into()),
                    bookings_count: Some(3),
                    total_spots: Some(5),
                },
                ClassSession {
                    key: "sess-2".into(),
                    acuity_id: Some("789".into()),
                    bookings_count: Some(0),
                    total_spots: Some(5),
                },
            ],
        },
        ClassDoc {
            id: "class-agility".into(),
            sessions: vec![ClassSession {
                key: "sess-3".into(),
                acuity_id: Some("456".into()),
                bookings_count: Some(1),
                total_spots: None,
            }],
        },
    ]
}

/// Production-mode config: secret configured, signatures enforced.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        acuity_api_key: Some(TEST_SECRET.to_string()),
        development: false,
    }
}

/// Development-mode config: secret configured but unsigned requests pass.
pub fn dev_config() -> ServerConfig {
    ServerConfig {
        development: true,
        ..test_config()
    }
}

/// Config without a shared secret: verification skipped entirely.
pub fn open_config() -> ServerConfig {
    ServerConfig {
        acuity_api_key: None,
        ..test_config()
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<RecordingStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a form-encoded webhook body, optionally with a signature header.
pub async fn post_form(
    app: Router,
    path: &str,
    body: &str,
    signature: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(sig) = signature {
        builder = builder.header("x-acuity-signature", sig);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
