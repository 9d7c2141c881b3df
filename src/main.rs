//! # newswatch
//!
//! A keyword news alert pipeline that polls a news-search API, keeps only
//! stories published within a trailing time window, resolves each story to
//! article content with a graceful fallback chain, suppresses near-duplicate
//! headlines, and pushes a formatted Telegram alert for each survivor.
//!
//! ## Usage
//!
//! ```sh
//! newswatch -k "acme corp,acme defense"
//! ```
//!
//! Credentials and the chat id come from the environment; see `--help`.
//!
//! ## Architecture
//!
//! One invocation is one best-effort pass, designed to be re-run by an
//! external scheduler every 15–20 minutes:
//! 1. **Search**: one bounded, recency-sorted page per keyword
//! 2. **Filter**: publish-window gate against a single per-run reference time
//! 3. **Extract**: article parse with social-metadata and pass-through fallbacks
//! 4. **Deduplicate**: similarity check against titles already sent this run
//! 5. **Dispatch**: HTML-formatted Telegram message per surviving story
//!
//! There is no state between runs; the overlap of consecutive polling
//! windows is what makes a failed run self-heal.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod alert;
mod cli;
mod dedup;
mod error;
mod extract;
mod models;
mod pipeline;
mod search;
mod utils;
mod window;

use alert::TelegramNotifier;
use cli::Cli;
use extract::Extractor;
use pipeline::Pipeline;
use search::SearchClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newswatch starting up");

    // Parse CLI / environment
    let args = Cli::parse();
    debug!(
        window_minutes = args.window_minutes,
        threshold = args.similarity_threshold,
        page_size = args.page_size,
        "Parsed configuration"
    );

    // Configuration checks that clap's presence checks can't express: the
    // dispatcher must never be called with an empty destination.
    if args.chat_id.trim().is_empty() {
        return Err("CHAT_ID is set but empty; refusing to run".into());
    }
    let keywords: Vec<String> = args
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err("no usable keywords configured".into());
    }
    info!(count = keywords.len(), "Watching keywords");

    // --- Wire the pipeline ---
    let search = SearchClient::new(
        args.search_api_url,
        args.client_id,
        args.client_secret,
        args.page_size,
    );
    let extractor = Extractor::new();
    let notifier = TelegramNotifier::new(&args.telegram_token);
    let pipeline = Pipeline::new(
        &search,
        &extractor,
        &notifier,
        args.chat_id,
        args.window_minutes,
        args.similarity_threshold,
    );

    // --- Single best-effort pass ---
    let dispatched = pipeline.run(&keywords).await;

    let elapsed = start_time.elapsed();
    info!(
        dispatched,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
