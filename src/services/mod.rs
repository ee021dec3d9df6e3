// src/services/mod.rs

//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Index traversal (`IndexTraverser`)
//! - Detail page extraction (`DetailFetcher`)
//! - Bounded-concurrency dispatch (`FetchOrchestrator`)

mod detail;
mod fetch;
mod index;

pub use detail::DetailFetcher;
pub use fetch::{FetchOrchestrator, FetchOutcome};
pub use index::IndexTraverser;
