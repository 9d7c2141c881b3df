//! Command-line interface definitions for newswatch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment
//! variables, which is how the scheduled runner supplies credentials.

use clap::Parser;

use crate::dedup::DEFAULT_SIMILARITY_THRESHOLD;

/// Command-line arguments for the newswatch application.
///
/// One invocation performs one complete pass over the configured keywords
/// and exits; scheduling is the caller's job (cron, CI workflow, etc.).
///
/// # Examples
///
/// ```sh
/// # Keywords inline, credentials from the environment
/// newswatch -k "acme corp,acme defense"
///
/// # Wider acceptance window for a 30-minute schedule
/// newswatch -k "acme corp" -w 35
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keywords to watch, comma-separated
    #[arg(short, long, env = "WATCH_KEYWORDS", value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// Acceptance window in minutes; match it to the scheduler interval
    #[arg(short, long, env = "WINDOW_MINUTES", default_value_t = 20)]
    pub window_minutes: i64,

    /// Similarity ratio at or above which two titles count as one story
    #[arg(short = 't', long, env = "SIMILARITY_THRESHOLD", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub similarity_threshold: f64,

    /// Results requested per keyword
    #[arg(long, env = "SEARCH_PAGE_SIZE", default_value_t = 10)]
    pub page_size: u32,

    /// News-search API endpoint
    #[arg(
        long,
        env = "SEARCH_API_URL",
        default_value = "https://openapi.naver.com/v1/search/news.json"
    )]
    pub search_api_url: String,

    /// Search API client id
    #[arg(long, env = "NAVER_CLIENT_ID")]
    pub client_id: String,

    /// Search API client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// Telegram chat id to deliver alerts to
    #[arg(long, env = "CHAT_ID")]
    pub chat_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "newswatch",
            "--keywords",
            "acme corp,acme defense",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "--telegram-token",
            "123:abc",
            "--chat-id",
            "42",
        ]
    }

    #[test]
    fn test_cli_parses_keyword_list() {
        let cli = Cli::parse_from(base_args());
        assert_eq!(cli.keywords, vec!["acme corp", "acme defense"]);
        assert_eq!(cli.window_minutes, 20);
        assert_eq!(cli.similarity_threshold, 0.7);
        assert_eq!(cli.page_size, 10);
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = base_args();
        args.extend(["-w", "35", "-t", "0.8", "--page-size", "25"]);
        let cli = Cli::parse_from(args);
        assert_eq!(cli.window_minutes, 35);
        assert_eq!(cli.similarity_threshold, 0.8);
        assert_eq!(cli.page_size, 25);
    }

    #[test]
    fn test_cli_requires_keywords() {
        let result = Cli::try_parse_from(["newswatch", "--chat-id", "42"]);
        assert!(result.is_err());
    }
}
