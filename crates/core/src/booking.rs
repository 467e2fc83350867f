//! Webhook action parsing and booking-counter arithmetic.

/// The two Acuity webhook actions that mutate a booking counter.
///
/// Every other action value (`changed`, `rescheduled`, `completed`, ...) is
/// acknowledged with 200 and ignored, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Scheduled,
    Canceled,
}

impl BookingAction {
    /// Parse the `action` form field. Returns `None` for actions that do not
    /// mutate state.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "scheduled" => Some(BookingAction::Scheduled),
            "canceled" => Some(BookingAction::Canceled),
            _ => None,
        }
    }

    /// The wire value of this action, echoed back in webhook responses.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingAction::Scheduled => "scheduled",
            BookingAction::Canceled => "canceled",
        }
    }

    /// Apply this action to a booking count.
    ///
    /// Cancellations clamp at zero; the counter never goes negative. This is
    /// deliberately not idempotent: replaying the same `scheduled` delivery
    /// increments twice, matching the upstream contract which carries no
    /// event id to deduplicate on.
    pub fn apply(self, current_bookings: i64) -> i64 {
        match self {
            BookingAction::Scheduled => current_bookings + 1,
            BookingAction::Canceled => (current_bookings - 1).max(0),
        }
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
