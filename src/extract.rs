//! Article content extraction with an ordered fallback chain.
//!
//! The page is fetched once with a bounded timeout, then handed to a chain
//! of parse strategies sharing one contract; the first strategy to produce
//! content wins:
//!
//! 1. **Structured article parse** — headline plus body paragraphs, with the
//!    site name from the page's own metadata
//! 2. **Social-metadata parse** — `og:`/`twitter:` sharing tags only
//! 3. **Pass-through** — the search row itself, when the fetch fails or no
//!    strategy finds anything
//!
//! Fetch and parse failures never escape this module; every failure mode
//! degrades to the next strategy and ultimately to the pass-through result.

use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::{NO_SUMMARY, ResolvedArticle, UNKNOWN_PUBLISHER, non_empty_title};
use crate::utils::preview;

/// Maximum characters of body text shown in a notification summary.
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

/// Timeout for fetching one article page.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// What one parse strategy could recover from a page. Missing pieces are
/// filled from the search row when the article is assembled.
#[derive(Debug, Default)]
struct PageExtract {
    title: Option<String>,
    publisher: Option<String>,
    summary: Option<String>,
}

/// Ordered parse strategies over a fetched document; first success wins.
const PARSE_CHAIN: &[(&str, fn(&Html) -> Option<PageExtract>)] = &[
    ("article", parse_article),
    ("social-meta", parse_social_meta),
];

/// Fetches article pages and resolves them to a displayable
/// title/publisher/summary triple.
pub struct Extractor {
    client: Client,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(concat!("newswatch/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Resolve a candidate link to article content.
    ///
    /// Never fails: if the page cannot be fetched or no strategy produces
    /// content, the result is built from the search row with sentinel
    /// publisher and summary values. The returned title is never empty.
    #[instrument(level = "info", skip(self, cleaned_raw_title), fields(%url))]
    pub async fn extract(&self, url: &str, cleaned_raw_title: &str) -> ResolvedArticle {
        let html = match self.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Page fetch failed; using search row as-is");
                return ResolvedArticle::passthrough(cleaned_raw_title, url);
            }
        };

        let document = Html::parse_document(&html);
        match extract_from_document(&document, cleaned_raw_title, url) {
            Some(article) => article,
            None => {
                debug!("No parse strategy produced content; using search row as-is");
                ResolvedArticle::passthrough(cleaned_raw_title, url)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the parse chain over a document. `None` means no strategy fired and
/// the caller should fall back to the search row.
fn extract_from_document(
    document: &Html,
    cleaned_raw_title: &str,
    url: &str,
) -> Option<ResolvedArticle> {
    for (name, strategy) in PARSE_CHAIN {
        if let Some(extract) = strategy(document) {
            debug!(strategy = name, "Parse strategy produced content");
            return Some(assemble(extract, cleaned_raw_title, url));
        }
    }
    None
}

/// Strategy 1: structured article parse.
///
/// Requires a headline (`h1`, else `og:title`) and at least one paragraph
/// of body text inside an `article` element; the summary is a bounded
/// preview of the body.
fn parse_article(document: &Html) -> Option<PageExtract> {
    let headline =
        select_text(document, "h1").or_else(|| meta_content(document, r#"meta[property="og:title"]"#))?;

    let body_selector = Selector::parse("article p").unwrap();
    let mut body = String::new();
    for paragraph in document.select(&body_selector) {
        let text = paragraph.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            body.push_str(&text);
            body.push(' ');
        }
    }
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    Some(PageExtract {
        title: Some(headline),
        publisher: meta_content(document, r#"meta[property="og:site_name"]"#),
        summary: Some(preview(body, SUMMARY_PREVIEW_CHARS)),
    })
}

/// Strategy 2: social-sharing metadata only.
///
/// Fires when the page carries a site name or description tag even though
/// no parseable article body was found.
fn parse_social_meta(document: &Html) -> Option<PageExtract> {
    let publisher = meta_content(document, r#"meta[property="og:site_name"]"#);
    let description = meta_content(document, r#"meta[property="og:description"]"#)
        .or_else(|| meta_content(document, r#"meta[name="twitter:description"]"#))
        .or_else(|| meta_content(document, r#"meta[name="description"]"#));

    if publisher.is_none() && description.is_none() {
        return None;
    }

    Some(PageExtract {
        title: meta_content(document, r#"meta[property="og:title"]"#),
        publisher,
        summary: description.map(|d| preview(&d, SUMMARY_PREVIEW_CHARS)),
    })
}

/// Fill the gaps a strategy left: title falls back to the cleaned raw title,
/// publisher to the link's host and then the sentinel, summary to the
/// sentinel.
fn assemble(extract: PageExtract, cleaned_raw_title: &str, url: &str) -> ResolvedArticle {
    let title = extract
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(cleaned_raw_title);

    let publisher = extract
        .publisher
        .or_else(|| host_name(url))
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());

    ResolvedArticle {
        title: non_empty_title(title),
        publisher,
        summary: extract.summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
        source_link: url.to_string(),
    }
}

/// Host portion of a URL, without a leading `www.`
fn host_name(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CONTENT_UNAVAILABLE, FEED_PUBLISHER, UNTITLED};

    const FULL_ARTICLE: &str = r#"<html><head>
        <meta property="og:site_name" content="Example Times"/>
        <meta property="og:description" content="Short sharing blurb"/>
        </head><body>
        <h1>Acme lands record export contract</h1>
        <article><p>Acme Corp said on Tuesday it had signed its largest export contract to date.</p>
        <p>The deal covers three years of deliveries.</p></article>
        </body></html>"#;

    const META_ONLY: &str = r#"<html><head>
        <meta property="og:site_name" content="Example Times"/>
        <meta property="og:description" content="Acme signs its largest deal yet"/>
        <meta property="og:title" content="Acme deal, per the tags"/>
        </head><body><div>script-rendered page</div></body></html>"#;

    const BARE_PAGE: &str = "<html><body><p>nothing useful</p></body></html>";

    #[test]
    fn test_article_strategy_wins_on_full_page() {
        let document = Html::parse_document(FULL_ARTICLE);
        let article = extract_from_document(&document, "raw title", "https://www.example.com/s/1").unwrap();
        assert_eq!(article.title, "Acme lands record export contract");
        assert_eq!(article.publisher, "Example Times");
        assert!(article.summary.starts_with("Acme Corp said on Tuesday"));
    }

    #[test]
    fn test_meta_strategy_used_when_article_parse_fails() {
        let document = Html::parse_document(META_ONLY);
        let article = extract_from_document(&document, "raw title", "https://www.example.com/s/1").unwrap();
        assert_eq!(article.title, "Acme deal, per the tags");
        assert_eq!(article.publisher, "Example Times");
        assert_eq!(article.summary, "Acme signs its largest deal yet");
    }

    #[test]
    fn test_no_strategy_fires_on_bare_page() {
        let document = Html::parse_document(BARE_PAGE);
        assert!(extract_from_document(&document, "raw title", "https://example.com").is_none());
    }

    #[test]
    fn test_meta_strategy_without_title_uses_raw_title() {
        let html = r#"<html><head>
            <meta property="og:description" content="A description only"/>
            </head><body></body></html>"#;
        let document = Html::parse_document(html);
        let article =
            extract_from_document(&document, "Cleaned raw title", "https://www.example.com/s/1").unwrap();
        assert_eq!(article.title, "Cleaned raw title");
        // No site name tag: the link's host stands in for the publisher.
        assert_eq!(article.publisher, "example.com");
        assert_eq!(article.summary, "A description only");
    }

    #[test]
    fn test_publisher_sentinel_when_host_unparseable() {
        let html = r#"<html><head>
            <meta property="og:description" content="A description only"/>
            </head><body></body></html>"#;
        let document = Html::parse_document(html);
        let article = extract_from_document(&document, "Title", "not a url").unwrap();
        assert_eq!(article.publisher, UNKNOWN_PUBLISHER);
    }

    #[test]
    fn test_summary_sentinel_when_meta_has_site_name_only() {
        let html = r#"<html><head>
            <meta property="og:site_name" content="Example Times"/>
            </head><body></body></html>"#;
        let document = Html::parse_document(html);
        let article = extract_from_document(&document, "Title", "https://example.com").unwrap();
        assert_eq!(article.summary, NO_SUMMARY);
    }

    #[test]
    fn test_body_preview_is_bounded_with_marker() {
        let long_body = "word ".repeat(60);
        let html = format!(
            "<html><body><h1>Headline</h1><article><p>{long_body}</p></article></body></html>"
        );
        let document = Html::parse_document(&html);
        let article = extract_from_document(&document, "raw", "https://example.com").unwrap();
        assert_eq!(article.summary.chars().count(), SUMMARY_PREVIEW_CHARS + 1);
        assert!(article.summary.ends_with('…'));
    }

    #[test]
    fn test_title_never_empty_even_with_empty_raw_title() {
        let html = r#"<html><head>
            <meta property="og:description" content="desc"/>
            </head><body></body></html>"#;
        let document = Html::parse_document(html);
        let article = extract_from_document(&document, "  ", "https://example.com").unwrap();
        assert_eq!(article.title, UNTITLED);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_passthrough() {
        let extractor = Extractor::new();
        // Nothing listens on the discard port; the fetch fails immediately.
        let article = extractor
            .extract("http://127.0.0.1:9/story", "Raw headline from the feed")
            .await;
        assert_eq!(article.title, "Raw headline from the feed");
        assert_eq!(article.publisher, FEED_PUBLISHER);
        assert_eq!(article.summary, CONTENT_UNAVAILABLE);
        assert_eq!(article.source_link, "http://127.0.0.1:9/story");
    }
}
