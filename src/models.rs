//! Data models for search results and their processed representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`CandidateItem`]: one raw row from the news-search API
//! - [`ResolvedArticle`]: the normalized outcome of content extraction
//! - [`DedupState`]: the run-scoped history of already-dispatched titles
//! - [`NotificationPayload`]: the final renderable unit handed to the dispatcher

use serde::Deserialize;

/// Publisher value used when no site name could be determined for a page.
pub const UNKNOWN_PUBLISHER: &str = "unknown publisher";

/// Publisher value used when the article page could not be read at all and
/// everything shown comes from the search API row.
pub const FEED_PUBLISHER: &str = "news search API";

/// Summary value used when a page was read but carried no usable body text.
pub const NO_SUMMARY: &str = "no summary available";

/// Summary value used when the article page could not be read at all.
pub const CONTENT_UNAVAILABLE: &str = "content unavailable";

/// Last-resort title. A resolved article's title is never empty.
pub const UNTITLED: &str = "(untitled)";

/// One row returned by the news-search API for one keyword.
///
/// Titles arrive with inline emphasis markup and escaped entities; links
/// come in two flavors, the aggregator's own `link` and the publisher's
/// `originallink`, the latter preferred when present.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateItem {
    /// Raw title, possibly decorated with `<b>` markup around the keyword.
    #[serde(rename = "title")]
    pub raw_title: String,
    /// Canonical link into the aggregator.
    pub link: String,
    /// The publisher's own URL, when the aggregator knows it.
    #[serde(rename = "originallink", default)]
    pub original_link: Option<String>,
    /// Publish timestamp as supplied by the source (RFC 2822 with offset).
    #[serde(rename = "pubDate")]
    pub pub_date: String,
}

impl CandidateItem {
    /// The link to fetch and display, preferring the publisher's own URL
    /// over the aggregator link when it is present and non-empty.
    pub fn display_link(&self) -> &str {
        match &self.original_link {
            Some(original) if !original.trim().is_empty() => original,
            _ => &self.link,
        }
    }
}

/// The response envelope of the news-search API.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<CandidateItem>,
}

/// The outcome of content extraction for one [`CandidateItem`].
///
/// `title` is never empty: extraction falls back to the candidate's cleaned
/// raw title, and as a last resort to [`UNTITLED`].
#[derive(Debug, Clone)]
pub struct ResolvedArticle {
    pub title: String,
    pub publisher: String,
    pub summary: String,
    /// The link ultimately used for display.
    pub source_link: String,
}

impl ResolvedArticle {
    /// Build an article entirely from the originating search row, used when
    /// the page could not be read or no strategy produced anything.
    pub fn passthrough(cleaned_raw_title: &str, link: &str) -> Self {
        Self {
            title: non_empty_title(cleaned_raw_title),
            publisher: FEED_PUBLISHER.to_string(),
            summary: CONTENT_UNAVAILABLE.to_string(),
            source_link: link.to_string(),
        }
    }
}

/// Guarantee a non-empty title.
pub fn non_empty_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Run-scoped history of already-dispatched titles.
///
/// Constructed fresh at the start of every run and owned by the
/// orchestrator; it only ever grows within a run and is never persisted.
/// Entries are exact resolved titles, never merged representations.
#[derive(Debug, Default)]
pub struct DedupState {
    sent_titles: Vec<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dispatched title to the history.
    pub fn record(&mut self, title: String) {
        self.sent_titles.push(title);
    }

    /// Read-only view of the history for similarity comparison.
    pub fn titles(&self) -> &[String] {
        &self.sent_titles
    }

    pub fn len(&self) -> usize {
        self.sent_titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent_titles.is_empty()
    }
}

/// The final renderable unit: markup-escaped text plus the destination
/// channel identifier. Created immediately before dispatch.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    pub text: String,
    pub chat_id: String,
}
