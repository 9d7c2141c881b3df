//! Utility functions for title cleanup, markup escaping, and text truncation.
//!
//! This module provides helper functions used throughout the application:
//! - Raw-title cleanup for search results that arrive with inline emphasis
//!   markup and escaped entities
//! - HTML escaping for outbound notification text
//! - Character-bounded preview truncation

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches inline markup tags such as `<b>` and `</b>` that the search API
/// embeds in result titles to highlight the matched keyword.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

/// Clean a raw search-result title.
///
/// Strips inline emphasis tags, unescapes the entity forms the search API
/// emits, and collapses surrounding whitespace.
///
/// # Arguments
///
/// * `raw` - The title exactly as returned by the search API
///
/// # Returns
///
/// A plain-text title suitable for display and similarity comparison.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_raw_title("<b>Acme</b> lands &quot;major&quot; deal"),
///            "Acme lands \"major\" deal");
/// ```
pub fn clean_raw_title(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    stripped
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for interpolation into an HTML-formatted notification.
///
/// Escapes ampersands and angle brackets so that scraped third-party text
/// cannot break the rendering of the outbound message. The ampersand is
/// replaced first so the other replacements are not re-escaped.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Truncate a string to a bounded number of characters.
///
/// Strings longer than `max_chars` are cut at a character boundary and get
/// an explicit `…` marker appended, so callers can distinguish a truncated
/// preview from a naturally short one. Shorter strings pass through
/// unchanged.
///
/// # Arguments
///
/// * `s` - The text to preview
/// * `max_chars` - Maximum number of characters to keep
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}
