// src/models/update.rs

//! Archived update records.

use serde::{Deserialize, Serialize};

use crate::identity;

/// A normalized, identity-tagged news update.
///
/// Immutable once created: a re-fetch of the same logical entry produces a
/// record that is compared by `id` only, never merged field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Update {
    /// Stable identity digest of (timestamp, title)
    pub id: String,

    /// Publication timestamp as shown on the detail page
    pub timestamp: String,

    /// Absolute URL of the detail page
    pub link: String,

    /// Title and body text, separated by a blank line
    pub entry: String,

    /// Preview image URL from the index summary, if any
    pub image_url: Option<String>,
}

impl Update {
    /// Build an update from the raw fields of a detail page.
    ///
    /// The id is computed from the raw timestamp and title before the
    /// title is folded into the first line of `entry`.
    pub fn from_detail(timestamp: &str, title: &str, body: &str, link: &str) -> Self {
        Self {
            id: identity::update_id(timestamp, title),
            timestamp: timestamp.to_string(),
            link: link.to_string(),
            entry: format!("{title}\n\n{body}"),
            image_url: None,
        }
    }
}
