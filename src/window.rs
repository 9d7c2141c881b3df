//! Time-window gate for candidate items.
//!
//! The run computes one reference instant at start; every candidate is then
//! judged against the same acceptance window, so the window does not shrink
//! as the batch progresses. Timestamp parsing is a separate, tagged step:
//! the caller decides what a parse failure means (here: exclude the
//! candidate from this run) instead of the parser guessing.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::TimestampError;

/// Parse a publish timestamp as supplied by the search API.
///
/// The source emits RFC 2822 with a numeric offset
/// (`Tue, 05 Aug 2025 09:00:00 +0900`).
///
/// # Returns
///
/// The parsed timestamp with its original offset, or a [`TimestampError`]
/// carrying the offending value.
pub fn parse_published(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc2822(raw.trim()).map_err(|source| TimestampError {
        value: raw.to_string(),
        source,
    })
}

/// Decide whether a publish timestamp falls inside the acceptance window.
///
/// An item is recent iff `published <= now` and `now - published < window`.
/// Items dated in the future relative to `now` (clock skew between the
/// source and this process) are excluded; the next scheduled run picks them
/// up once their timestamp is in the past.
///
/// Offsets are respected: two renderings of the same instant in different
/// timezones produce the same verdict.
pub fn is_recent(published: DateTime<FixedOffset>, now: DateTime<Utc>, window: Duration) -> bool {
    let published = published.with_timezone(&Utc);
    published <= now && now - published < window
}
