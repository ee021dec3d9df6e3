// src/models/entry.rs

//! Entry references discovered on index pages.

/// A link discovered on the index, not yet fetched in detail.
///
/// Ephemeral: produced by the index traverser, consumed by the fetch
/// orchestrator within the same run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    /// Absolute URL of the detail page
    pub link: String,

    /// Preview image URL, if the entry summary carried one
    pub image_url: Option<String>,
}
