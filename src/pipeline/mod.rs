// src/pipeline/mod.rs

//! Pipeline entry points for crawler operations.
//!
//! - `run_crawl`: one traverse → fetch → merge cycle
//! - `merge_and_persist`: identity-keyed merge into the archive

pub mod crawl;
pub mod merge;

pub use crawl::run_crawl;
pub use merge::{MergeReport, merge_and_persist};
