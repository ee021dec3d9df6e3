// src/storage/mod.rs

//! Storage abstractions for the persisted update archive.
//!
//! The archive is a single ordered sequence of updates, newest-first by
//! discovery order. It is read once at the start of a run and overwritten
//! whole at the end; there are no append semantics. Concurrent runs
//! against the same backing location are not supported.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Update;

// Re-export for convenience
pub use local::LocalStore;

/// Trait for update archive backends.
#[async_trait]
pub trait UpdateStore: Send + Sync {
    /// Load the persisted updates.
    ///
    /// An archive that does not exist yet loads as an empty sequence; an
    /// archive that exists but cannot be read or parsed is an error.
    async fn load(&self) -> Result<Vec<Update>>;

    /// Overwrite the archive with the given sequence.
    async fn save(&self, updates: &[Update]) -> Result<()>;
}
