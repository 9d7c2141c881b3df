//! Alert formatting and Telegram delivery.
//!
//! The formatter renders a resolved article into the four-line alert
//! message, escaping every interpolated field for the channel's HTML
//! subset. Delivery goes through the [`Dispatch`] trait so the orchestrator
//! can be exercised against an in-memory dispatcher.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::DispatchError;
use crate::models::{NotificationPayload, ResolvedArticle};
use crate::utils::escape_html;

/// Timeout for one delivery attempt.
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability: deliver one formatted notification to its destination.
pub trait Dispatch {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<(), DispatchError>;
}

/// Render a resolved article into an HTML-safe notification message.
///
/// All four fields are escaped before interpolation; scraped titles and
/// summaries routinely contain raw HTML fragments. The channel decodes
/// entities when rendering, so the escaped link displays as the original
/// URL and stays clickable.
pub fn format_alert(article: &ResolvedArticle) -> String {
    format!(
        "🚨 <b>{}</b>\n📰 <b>{}</b>\n📝 {}\n🔗 {}",
        escape_html(&article.title),
        escape_html(&article.publisher),
        escape_html(&article.summary),
        escape_html(&article.source_link),
    )
}

/// Build the payload for a destination channel.
pub fn render(article: &ResolvedArticle, chat_id: &str) -> NotificationPayload {
    NotificationPayload {
        text: format_alert(article),
        chat_id: chat_id.to_string(),
    }
}

/// Telegram Bot API dispatcher.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
}

impl TelegramNotifier {
    pub fn new(token: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(DISPATCH_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: format!("https://api.telegram.org/bot{token}/sendMessage"),
        }
    }
}

impl Dispatch for TelegramNotifier {
    #[instrument(level = "info", skip_all, fields(chat_id = %payload.chat_id))]
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&serde_json::json!({
                "chat_id": payload.chat_id,
                "text": payload.text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> ResolvedArticle {
        ResolvedArticle {
            title: "Acme wins export contract".to_string(),
            publisher: "Example Times".to_string(),
            summary: "Acme Corp signed its largest deal to date.".to_string(),
            source_link: "https://example.com/story?id=42".to_string(),
        }
    }

    #[test]
    fn test_format_contains_all_four_fields() {
        let text = format_alert(&article());
        assert!(text.contains("Acme wins export contract"));
        assert!(text.contains("Example Times"));
        assert!(text.contains("Acme Corp signed its largest deal to date."));
        assert!(text.contains("https://example.com/story?id=42"));
    }

    #[test]
    fn test_format_escapes_injected_markup() {
        let mut a = article();
        a.title = "Breaking: <script>alert(1)</script> hits the wires".to_string();
        let text = format_alert(&a);
        assert!(text.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!text.contains("<script>"));
        // The link line is untouched and remains a plain URL.
        assert!(text.contains("🔗 https://example.com/story?id=42"));
    }

    #[test]
    fn test_format_escapes_link_entities_reversibly() {
        let mut a = article();
        a.source_link = "https://example.com/story?id=42&lang=en".to_string();
        let text = format_alert(&a);
        // The ampersand is entity-escaped for the HTML parse mode; the
        // channel decodes it back to the original URL on render.
        assert!(text.contains("https://example.com/story?id=42&amp;lang=en"));
        assert!(!text.contains("lang=en&"));
    }

    #[test]
    fn test_render_sets_destination() {
        let payload = render(&article(), "12345");
        assert_eq!(payload.chat_id, "12345");
        assert!(payload.text.starts_with("🚨 <b>"));
    }

    #[test]
    fn test_notifier_builds_api_url() {
        let notifier = TelegramNotifier::new("123:abc");
        assert_eq!(
            notifier.api_url,
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }
}
