//! News-search API client.
//!
//! Queries the search endpoint for one keyword at a time, requesting a
//! bounded page of results sorted by recency. The [`SearchNews`] trait is
//! the seam between the orchestrator and the network so the pipeline can be
//! exercised against an in-memory source.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::SearchError;
use crate::models::{CandidateItem, SearchResponse};

/// Timeout for a single search request.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability: given a keyword, return candidate items ordered by recency.
pub trait SearchNews {
    /// Fetch one page of candidates for `keyword`, most recent first.
    async fn search(&self, keyword: &str) -> Result<Vec<CandidateItem>, SearchError>;
}

/// HTTP client for the news-search API.
///
/// Credentials travel as request headers; the query string carries the
/// url-encoded keyword, the page size, and the recency sort order.
pub struct SearchClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    page_size: u32,
}

impl SearchClient {
    pub fn new(base_url: String, client_id: String, client_secret: String, page_size: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(SEARCH_TIMEOUT)
                .user_agent(concat!("newswatch/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            client_id,
            client_secret,
            page_size,
        }
    }

    /// The full request URL for one keyword.
    fn request_url(&self, keyword: &str) -> String {
        format!(
            "{}?query={}&display={}&sort=date",
            self.base_url,
            urlencoding::encode(keyword),
            self.page_size
        )
    }
}

impl SearchNews for SearchClient {
    #[instrument(level = "info", skip(self))]
    async fn search(&self, keyword: &str) -> Result<Vec<CandidateItem>, SearchError> {
        let url = self.request_url(keyword);
        debug!(%url, "Requesting search page");

        let response = self
            .client
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(keyword, count = parsed.items.len(), "Search page decoded");
        Ok(parsed.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SearchClient {
        SearchClient::new(
            "https://openapi.example.com/v1/search/news.json".to_string(),
            "id".to_string(),
            "secret".to_string(),
            10,
        )
    }

    #[test]
    fn test_request_url_encodes_keyword() {
        let url = client().request_url("acme corp");
        assert_eq!(
            url,
            "https://openapi.example.com/v1/search/news.json?query=acme%20corp&display=10&sort=date"
        );
    }

    #[test]
    fn test_request_url_encodes_non_ascii() {
        let url = client().request_url("날씨");
        assert!(url.contains("query=%EB%82%A0%EC%94%A8"));
        assert!(url.ends_with("&display=10&sort=date"));
    }
}
