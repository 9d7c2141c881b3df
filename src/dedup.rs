//! Near-duplicate suppression for story titles within a single run.
//!
//! Similarity is a normalized Levenshtein ratio in `[0, 1]`: 1.0 for
//! identical sequences, symmetric in its arguments. A candidate counts as a
//! duplicate when its ratio against any already-dispatched title meets the
//! threshold. The comparison runs on normalized text (lowercased, collapsed
//! whitespace) while the history keeps exact titles.

use strsim::normalized_levenshtein;
use tracing::debug;

use crate::models::DedupState;

/// Default similarity threshold above which two titles are one story.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Normalize text for comparison (lowercase, collapse whitespace).
fn normalize(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Similarity ratio between two titles in the closed range `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    normalized_levenshtein(&a, &b)
}

/// Whether `candidate` is a near-duplicate of any title in `history`.
///
/// Adding entries to the history can only turn a non-duplicate verdict into
/// a duplicate one for a fixed candidate, never the reverse.
pub fn is_duplicate(candidate: &str, history: &DedupState, threshold: f64) -> bool {
    for sent in history.titles() {
        let ratio = similarity(candidate, sent);
        if ratio >= threshold {
            debug!(
                candidate,
                matched = %sent,
                ratio,
                "Title matches an already-dispatched story"
            );
            return true;
        }
    }
    false
}
