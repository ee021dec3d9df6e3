// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Crawl target and output location
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// CSS selectors for the index and detail pages
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.index_url.trim().is_empty() {
            return Err(AppError::config("source.index_url is empty"));
        }
        if self.source.data_file.trim().is_empty() {
            return Err(AppError::config("source.data_file is empty"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.wait_timeout_secs == 0 {
            return Err(AppError::config("crawler.wait_timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::config("crawler.max_pages must be > 0"));
        }
        for (name, selector) in [
            ("selectors.entry", &self.selectors.entry),
            ("selectors.title", &self.selectors.title),
            ("selectors.date", &self.selectors.date),
            ("selectors.body", &self.selectors.body),
        ] {
            if selector.trim().is_empty() {
                return Err(AppError::config(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}

/// Crawl target and output location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the first index page
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// Path of the persisted update archive
    #[serde(default = "defaults::data_file")]
    pub data_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
            data_file: defaults::data_file(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// How long to wait for a selector to appear on a page, in seconds
    #[serde(default = "defaults::wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Interval between selector polls in milliseconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,

    /// Delay between completed detail fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Safety bound on index pages walked per run
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            wait_timeout_secs: defaults::wait_timeout(),
            poll_interval_ms: defaults::poll_interval(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// CSS selectors for the index and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selector for each entry summary link on an index page
    #[serde(default = "defaults::entry_selector")]
    pub entry: String,

    /// Selector for the preview image element within an entry summary
    #[serde(default = "defaults::entry_image_selector")]
    pub entry_image: String,

    /// Selector for the next-page control
    #[serde(default = "defaults::next_selector")]
    pub next: String,

    /// Attribute marking the next-page control as disabled
    #[serde(default = "defaults::next_disabled_attr")]
    pub next_disabled_attr: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// Selector for the title region on a detail page
    #[serde(default = "defaults::title_selector")]
    pub title: String,

    /// Selector for the timestamp region on a detail page
    #[serde(default = "defaults::date_selector")]
    pub date: String,

    /// Selector for the body region on a detail page
    #[serde(default = "defaults::body_selector")]
    pub body: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entry: defaults::entry_selector(),
            entry_image: defaults::entry_image_selector(),
            next: defaults::next_selector(),
            next_disabled_attr: defaults::next_disabled_attr(),
            link_attr: defaults::link_attr(),
            title: defaults::title_selector(),
            date: defaults::date_selector(),
            body: defaults::body_selector(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn index_url() -> String {
        "https://www.counter-strike.net/news".into()
    }
    pub fn data_file() -> String {
        "data/updates.json".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; newswatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn wait_timeout() -> u64 {
        10
    }
    pub fn poll_interval() -> u64 {
        500
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        3
    }
    pub fn max_pages() -> usize {
        50
    }

    // Selector defaults match the obfuscated class names of the target
    // site's current build; override them in config.toml when they rotate.
    pub fn entry_selector() -> String {
        "a._3OBoG7TZb8gxM8NbILzAan".into()
    }
    pub fn entry_image_selector() -> String {
        ".Nh_xZMN_Sujrqhv-aCKHt".into()
    }
    pub fn next_selector() -> String {
        "a.pagination__next".into()
    }
    pub fn next_disabled_attr() -> String {
        "aria-disabled".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn title_selector() -> String {
        "._2HW6u-IlsL50KUqJyif8Ls".into()
    }
    pub fn date_selector() -> String {
        "._2JNhX05chbmg2pDcad3NuT".into()
    }
    pub fn body_selector() -> String {
        "._30GVvAUcc-I1luXxmzjBYK".into()
    }
}
