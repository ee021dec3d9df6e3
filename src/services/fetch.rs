// src/services/fetch.rs

//! Bounded-concurrency dispatch over detail fetches.
//!
//! Drives [`DetailFetcher`] across every collected entry reference. A
//! failed entry is counted and dropped; it never aborts sibling fetches.

use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, EntryRef, Update};
use crate::services::DetailFetcher;

/// Summary of a fetch stage.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successfully extracted updates, completion order
    pub updates: Vec<Update>,
    /// Number of entry references dispatched
    pub total: usize,
    /// Number of entries that failed extraction
    pub failures: usize,
}

/// Preview images by entry link, for reattachment after extraction.
fn image_lookup(refs: &[EntryRef]) -> HashMap<String, Option<String>> {
    refs.iter()
        .map(|r| (r.link.clone(), r.image_url.clone()))
        .collect()
}

/// Fold one fetch result into the outcome.
///
/// The extractor never sees the preview image; it is attached here by
/// matching the originating reference's link.
fn absorb_result(
    outcome: &mut FetchOutcome,
    images: &HashMap<String, Option<String>>,
    link: &str,
    result: Result<Update>,
) {
    match result {
        Ok(mut update) => {
            update.image_url = images.get(link).cloned().flatten();
            outcome.updates.push(update);
        }
        Err(error) => {
            outcome.failures += 1;
            log::warn!("Failed to fetch detail: {error}");
        }
    }
}

/// Service that fetches all detail pages under a concurrency cap.
pub struct FetchOrchestrator {
    fetcher: DetailFetcher,
    concurrency: usize,
    delay: Duration,
}

impl FetchOrchestrator {
    /// Create an orchestrator sharing the run's HTTP client.
    pub fn new(config: &Config, client: Client) -> Result<Self> {
        Ok(Self {
            fetcher: DetailFetcher::new(config, client)?,
            concurrency: config.crawler.max_concurrent.max(1),
            delay: Duration::from_millis(config.crawler.request_delay_ms),
        })
    }

    /// Fetch every referenced detail page, bounded by the concurrency cap.
    ///
    /// Result order follows completion, not input order; downstream
    /// dedup is keyed by id and does not care.
    pub async fn fetch_all(&self, refs: Vec<EntryRef>) -> FetchOutcome {
        let images = image_lookup(&refs);
        let mut outcome = FetchOutcome {
            total: refs.len(),
            ..FetchOutcome::default()
        };

        let mut results = stream::iter(refs)
            .map(|entry| async move {
                let result = self.fetcher.fetch_detail(&entry.link).await;
                (entry.link, result)
            })
            .buffer_unordered(self.concurrency);

        while let Some((link, result)) = results.next().await {
            absorb_result(&mut outcome, &images, &link, result);

            if self.delay.as_millis() > 0 {
                tokio::time::sleep(self.delay).await;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn make_ref(link: &str, image: Option<&str>) -> EntryRef {
        EntryRef {
            link: link.to_string(),
            image_url: image.map(str::to_string),
        }
    }

    fn make_update(link: &str) -> Update {
        Update::from_detail("2026-08-01", "Title", "Body", link)
    }

    #[test]
    fn test_image_lookup_keyed_by_link() {
        let refs = vec![
            make_ref("https://x.test/1", Some("https://cdn.test/1.png")),
            make_ref("https://x.test/2", None),
        ];
        let images = image_lookup(&refs);

        assert_eq!(
            images.get("https://x.test/1"),
            Some(&Some("https://cdn.test/1.png".to_string()))
        );
        assert_eq!(images.get("https://x.test/2"), Some(&None));
    }

    #[test]
    fn test_absorb_attaches_image_and_tolerates_failures() {
        let refs = vec![
            make_ref("https://x.test/1", Some("https://cdn.test/1.png")),
            make_ref("https://x.test/2", None),
            make_ref("https://x.test/3", Some("https://cdn.test/3.png")),
        ];
        let images = image_lookup(&refs);
        let mut outcome = FetchOutcome {
            total: refs.len(),
            ..FetchOutcome::default()
        };

        absorb_result(
            &mut outcome,
            &images,
            "https://x.test/1",
            Ok(make_update("https://x.test/1")),
        );
        absorb_result(
            &mut outcome,
            &images,
            "https://x.test/2",
            Err(AppError::extract("https://x.test/2", "timed out")),
        );
        absorb_result(
            &mut outcome,
            &images,
            "https://x.test/3",
            Ok(make_update("https://x.test/3")),
        );

        // k of n failed: exactly n - k records come back.
        assert_eq!(outcome.updates.len(), 2);
        assert_eq!(outcome.failures, 1);
        assert_eq!(
            outcome.updates[0].image_url.as_deref(),
            Some("https://cdn.test/1.png")
        );
        assert_eq!(
            outcome.updates[1].image_url.as_deref(),
            Some("https://cdn.test/3.png")
        );
    }

    #[tokio::test]
    async fn test_fetch_all_survives_unreachable_hosts() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 2;
        config.crawler.wait_timeout_secs = 1;
        config.crawler.request_delay_ms = 0;

        let client = crate::session::create_client(&config.crawler).unwrap();
        let orchestrator = FetchOrchestrator::new(&config, client).unwrap();

        let refs = vec![
            make_ref("http://127.0.0.1:1/a", None),
            make_ref("http://127.0.0.1:1/b", None),
        ];
        let outcome = orchestrator.fetch_all(refs).await;

        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.failures, 2);
        assert!(outcome.updates.is_empty());
    }
}
