//! The per-run pipeline: fetch → filter → extract → deduplicate → dispatch.
//!
//! One invocation processes every configured keyword in sequence. Per
//! candidate the gates run in a fixed order: publish-window check on the
//! source timestamp, a cheap duplicate check on the cleaned raw title
//! (avoids fetching pages for stories already sent), content extraction,
//! a second duplicate check on the resolved title, then formatting and
//! dispatch. Only a successfully dispatched title enters the history, so a
//! failed delivery can be retried by a later scheduled run.
//!
//! Failures are contained at the unit they occur in: a keyword whose search
//! fails yields zero candidates, a candidate whose timestamp cannot be
//! parsed is skipped, and a failed dispatch never aborts the batch.

use chrono::{Duration, Utc};
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::alert::{self, Dispatch};
use crate::dedup::is_duplicate;
use crate::extract::Extractor;
use crate::models::DedupState;
use crate::search::SearchNews;
use crate::utils::clean_raw_title;
use crate::window::{is_recent, parse_published};

/// Fixed pause between consecutive dispatch attempts, to stay friendly with
/// the destination channel's rate limits.
const SEND_SPACING: StdDuration = StdDuration::from_millis(300);

/// Drives one complete run across all configured keywords.
///
/// Owns the run-scoped [`DedupState`]; the search and dispatch capabilities
/// are injected through their traits.
pub struct Pipeline<'a, S, D> {
    search: &'a S,
    extractor: &'a Extractor,
    dispatcher: &'a D,
    chat_id: String,
    window: Duration,
    threshold: f64,
}

impl<'a, S, D> Pipeline<'a, S, D>
where
    S: SearchNews,
    D: Dispatch,
{
    pub fn new(
        search: &'a S,
        extractor: &'a Extractor,
        dispatcher: &'a D,
        chat_id: impl Into<String>,
        window_minutes: i64,
        threshold: f64,
    ) -> Self {
        Self {
            search,
            extractor,
            dispatcher,
            chat_id: chat_id.into(),
            window: Duration::minutes(window_minutes),
            threshold,
        }
    }

    /// Run the pipeline once over `keywords`.
    ///
    /// # Returns
    ///
    /// The number of notifications actually delivered.
    #[instrument(level = "info", skip_all, fields(keywords = keywords.len()))]
    pub async fn run(&self, keywords: &[String]) -> usize {
        // One reference instant for the whole batch, so the acceptance
        // window is identical for every candidate.
        let now = Utc::now();
        let mut history = DedupState::new();
        let mut dispatched = 0usize;
        let mut attempts = 0usize;

        for keyword in keywords {
            info!(%keyword, "Searching keyword");
            let items = match self.search.search(keyword).await {
                Ok(items) => items,
                Err(e) => {
                    error!(%keyword, error = %e, "Search failed; keyword yields no candidates");
                    continue;
                }
            };
            info!(%keyword, count = items.len(), "Fetched candidates");

            for item in items {
                let published = match parse_published(&item.pub_date) {
                    Ok(published) => published,
                    Err(e) => {
                        warn!(error = %e, link = %item.link, "Skipping candidate with bad timestamp");
                        continue;
                    }
                };
                if !is_recent(published, now, self.window) {
                    debug!(published = %published, link = %item.link, "Outside acceptance window");
                    continue;
                }

                let link = item.display_link().to_string();
                let raw_title = clean_raw_title(&item.raw_title);

                if is_duplicate(&raw_title, &history, self.threshold) {
                    info!(title = %raw_title, "Suppressed near-duplicate before extraction");
                    continue;
                }

                let article = self.extractor.extract(&link, &raw_title).await;

                if is_duplicate(&article.title, &history, self.threshold) {
                    info!(title = %article.title, "Suppressed near-duplicate after extraction");
                    continue;
                }

                let payload = alert::render(&article, &self.chat_id);

                if attempts > 0 {
                    sleep(SEND_SPACING).await;
                }
                attempts += 1;

                match self.dispatcher.dispatch(&payload).await {
                    Ok(()) => {
                        info!(title = %article.title, publisher = %article.publisher, "Alert dispatched");
                        history.record(article.title);
                        dispatched += 1;
                    }
                    Err(e) => {
                        // History stays untouched so a later run can retry.
                        error!(title = %article.title, error = %e, "Dispatch failed; continuing");
                    }
                }
            }
        }

        info!(dispatched, history = history.len(), "Run complete");
        dispatched
    }
}
