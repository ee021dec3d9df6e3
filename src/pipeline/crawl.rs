// src/pipeline/crawl.rs

//! One crawl-merge cycle.

use chrono::Utc;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::merge::{self, MergeReport};
use crate::services::{FetchOrchestrator, IndexTraverser};
use crate::session;
use crate::storage::UpdateStore;

/// Run one full cycle: traverse the index, fetch every referenced detail
/// page, and merge the results into the archive.
///
/// Index load and store failures abort the run; individual detail
/// failures only shrink the fetched set.
pub async fn run_crawl(config: &Config, store: &dyn UpdateStore) -> Result<MergeReport> {
    let started = Utc::now();
    log::info!("Crawling index at {}", config.source.index_url);

    let client = session::create_client(&config.crawler)?;

    let traverser = IndexTraverser::new(config, client.clone())?;
    let refs = traverser.collect().await?;

    let orchestrator = FetchOrchestrator::new(config, client)?;
    let outcome = orchestrator.fetch_all(refs).await;
    if outcome.failures > 0 {
        log::warn!(
            "{} of {} detail fetches failed",
            outcome.failures,
            outcome.total
        );
    }

    let report = merge::merge_and_persist(store, outcome.updates).await?;

    let elapsed = (Utc::now() - started).num_seconds();
    if report.new_count == 0 {
        log::info!(
            "No new updates found ({} archived, {}s elapsed)",
            report.total,
            elapsed
        );
    } else {
        log::info!(
            "{} new updates archived, {} total ({}s elapsed)",
            report.new_count,
            report.total,
            elapsed
        );
    }

    Ok(report)
}
