//! Error types for the external I/O boundaries.
//!
//! Each boundary gets its own error enum so the orchestrator can decide the
//! recovery policy per failure class: a failed keyword search yields zero
//! candidates for that keyword, a failed dispatch skips one notification,
//! and an unparseable publish timestamp excludes one candidate from the run.
//! Content-extraction failures are absorbed by the fallback chain and never
//! surface as errors.

use thiserror::Error;

/// Failure while querying the news-search API for one keyword.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The HTTP request itself failed (connect, timeout, protocol).
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("search API returned status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure while delivering one formatted notification.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The HTTP request itself failed (connect, timeout, protocol).
    #[error("dispatch request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery channel answered with a non-success status code.
    #[error("dispatch returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A publish timestamp that could not be parsed.
///
/// Carries the offending value so the skipped candidate can be identified
/// in the logs; the caller maps this to "exclude from this run".
#[derive(Debug, Error)]
#[error("unparseable publish timestamp {value:?}")]
pub struct TimestampError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}
