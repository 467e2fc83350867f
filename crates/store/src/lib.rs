//! Content-store access for class documents and their nested sessions.
//!
//! The production implementation ([`SanityStore`]) talks to the Sanity HTTP
//! API. Handlers depend on the [`ContentStore`] trait instead of the concrete
//! client so integration tests can substitute an in-memory store.

pub mod client;
pub mod config;
pub mod models;

pub use client::{ContentStore, SanityStore, StoreError};
pub use config::StoreConfig;
pub use models::{find_session_by_acuity_id, ClassDoc, ClassSession, SessionPatch};
