//! Tri-state session availability derived from capacity and booking count.
//!
//! This is the single source of truth for the open/nearlyFull/full rule.
//! Both the Acuity webhook handler and the editor-facing preview endpoint go
//! through [`derive_availability`], so the server and the CMS widget can
//! never drift apart.

use serde::{Deserialize, Serialize};

/// A session is "nearly full" once this many spots or fewer remain.
pub const NEARLY_FULL_REMAINING_SPOTS: i64 = 2;

/// A session is "nearly full" once bookings reach this percentage of capacity.
pub const NEARLY_FULL_PERCENT: f64 = 80.0;

/// How close a class session is to selling out.
///
/// Serialized in camelCase to match the values stored in the content store
/// (`open`, `nearlyFull`, `full`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    Open,
    NearlyFull,
    Full,
}

impl Availability {
    /// The content-store string value for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Open => "open",
            Availability::NearlyFull => "nearlyFull",
            Availability::Full => "full",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the availability state from capacity and current booking count.
///
/// Returns `None` when `total_spots` is absent or non-positive: capacity
/// tracking is off for that session and the caller must leave the stored
/// availability untouched rather than overwrite it.
///
/// Rule precedence matters: the full check runs first, so a session with
/// capacity 1 and 1 booking reports `Full`, never `NearlyFull`, even though
/// both conditions hold.
pub fn derive_availability(total_spots: Option<i64>, bookings_count: i64) -> Option<Availability> {
    let total = match total_spots {
        Some(t) if t > 0 => t,
        _ => return None,
    };

    let remaining = total - bookings_count;
    let percent_full = bookings_count as f64 / total as f64 * 100.0;

    let state = if remaining <= 0 {
        Availability::Full
    } else if remaining <= NEARLY_FULL_REMAINING_SPOTS || percent_full >= NEARLY_FULL_PERCENT {
        Availability::NearlyFull
    } else {
        Availability::Open
    };

    Some(state)
}
