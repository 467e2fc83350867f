//! Serde models for class documents and their nested booking sessions.
//!
//! Field names mirror the content-store schema (`_id`, `_key`, `acuityId`,
//! `bookingsCount`, `totalSpots`), so these types deserialize directly from
//! GROQ query results.

use packleader_core::availability::Availability;
use serde::{Deserialize, Serialize};

/// A parent class document owning an ordered collection of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDoc {
    #[serde(rename = "_id")]
    pub id: String,
    /// Upcoming sessions; absent in the store means no sessions.
    #[serde(rename = "upcomingClasses", default)]
    pub sessions: Vec<ClassSession>,
}

/// One scheduled occurrence of a class, nested inside a [`ClassDoc`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSession {
    /// Internal array key; mutations address the session by this, never by
    /// the external id.
    #[serde(rename = "_key")]
    pub key: String,
    /// The Acuity appointment-type id. Unique by convention only, not
    /// enforced by the store.
    #[serde(rename = "acuityId", default)]
    pub acuity_id: Option<String>,
    #[serde(rename = "bookingsCount", default)]
    pub bookings_count: Option<i64>,
    /// Absent means capacity tracking is disabled for this session.
    #[serde(rename = "totalSpots", default)]
    pub total_spots: Option<i64>,
}

impl ClassSession {
    /// Current booking count, defaulting to 0 when the field was never set.
    pub fn current_bookings(&self) -> i64 {
        self.bookings_count.unwrap_or(0)
    }
}

/// A matching session together with its owning document id.
#[derive(Debug, Clone, Copy)]
pub struct SessionMatch<'a> {
    pub doc_id: &'a str,
    pub session: &'a ClassSession,
}

/// Locate the first session whose `acuityId` equals `acuity_id`.
///
/// External ids are unique by convention only; when duplicates exist the
/// first match in document order wins.
pub fn find_session_by_acuity_id<'a>(
    docs: &'a [ClassDoc],
    acuity_id: &str,
) -> Option<SessionMatch<'a>> {
    docs.iter().find_map(|doc| {
        doc.sessions
            .iter()
            .find(|s| s.acuity_id.as_deref() == Some(acuity_id))
            .map(|session| SessionMatch {
                doc_id: &doc.id,
                session,
            })
    })
}

/// The single mutation the webhook applies: new booking count, and the
/// recomputed availability when capacity tracking is on.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPatch {
    pub doc_id: String,
    pub session_key: String,
    pub bookings_count: i64,
    /// `None` when capacity tracking is off: the stored availability is left
    /// untouched and only the booking count is written.
    pub availability: Option<Availability>,
}
