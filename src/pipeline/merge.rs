// src/pipeline/merge.rs

//! Identity-keyed merge of fresh updates into the persisted archive.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::Update;
use crate::storage::UpdateStore;

/// Outcome of a merge against the persisted archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Updates not previously archived
    pub new_count: usize,
    /// Archive size after the merge
    pub total: usize,
    /// Whether a persist write occurred
    pub wrote: bool,
}

/// Filter `fresh` down to updates whose id is not yet archived,
/// deduplicating by id within the batch (first wins), preserving order.
pub fn select_new(fresh: Vec<Update>, prior: &[Update]) -> Vec<Update> {
    let prior_ids: HashSet<&str> = prior.iter().map(|u| u.id.as_str()).collect();

    let mut batch_ids: HashSet<String> = HashSet::new();
    let mut fresh_only = Vec::new();
    for update in fresh {
        if prior_ids.contains(update.id.as_str()) {
            continue;
        }
        if batch_ids.insert(update.id.clone()) {
            fresh_only.push(update);
        }
    }
    fresh_only
}

/// Merge freshly fetched updates into the archive.
///
/// New updates are prepended ahead of the prior sequence, which is kept
/// verbatim. When nothing is new, no write occurs at all.
pub async fn merge_and_persist(
    store: &dyn UpdateStore,
    fresh: Vec<Update>,
) -> Result<MergeReport> {
    let prior = store.load().await?;
    let fresh_only = select_new(fresh, &prior);

    if fresh_only.is_empty() {
        return Ok(MergeReport {
            new_count: 0,
            total: prior.len(),
            wrote: false,
        });
    }

    let new_count = fresh_only.len();
    let mut merged = fresh_only;
    merged.extend(prior);

    store.save(&merged).await?;

    Ok(MergeReport {
        new_count,
        total: merged.len(),
        wrote: true,
    })
}
