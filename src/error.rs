// src/error.rs

//! Unified error handling for the crawler application.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page never yielded a selector match within the wait timeout
    #[error("Timed out after {timeout_secs}s waiting for '{selector}' at {url}")]
    WaitTimeout {
        url: String,
        selector: String,
        timeout_secs: u64,
    },

    /// The index page could not be loaded; fatal to the run
    #[error("Index load failed for {url}: {message}")]
    IndexLoad { url: String, message: String },

    /// A single detail page could not be extracted; recovered per entry
    #[error("Extraction failed for {link}: {message}")]
    Extract { link: String, message: String },

    /// The persisted store exists but could not be read
    #[error("Store load failed at {path}: {message}")]
    StoreLoad { path: String, message: String },

    /// The merged store could not be durably written
    #[error("Persist failed at {path}: {message}")]
    Persist { path: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an index load error.
    pub fn index_load(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::IndexLoad {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a per-entry extraction error.
    pub fn extract(link: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            link: link.into(),
            message: message.to_string(),
        }
    }

    /// Create a store load error.
    pub fn store_load(path: &Path, message: impl fmt::Display) -> Self {
        Self::StoreLoad {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a persist error.
    pub fn persist(path: &Path, message: impl fmt::Display) -> Self {
        Self::Persist {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
