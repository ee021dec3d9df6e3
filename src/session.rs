// src/session.rs

//! Page sessions over the HTTP fetch layer.
//!
//! A [`Session`] holds one "current page" at a time: navigation fetches the
//! document, and bounded waits re-fetch it until a selector matches. Each
//! concurrent unit of work owns its own session; only the underlying
//! [`reqwest::Client`] connection pool is shared.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tokio::time::Instant;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured HTTP client shared by all sessions of a run.
pub fn create_client(config: &CrawlerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// A single browsing session with one current page.
pub struct Session {
    client: Client,
    wait_timeout: Duration,
    poll_interval: Duration,
    url: String,
    source: String,
}

impl Session {
    /// Create a session with no page loaded yet.
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
            url: String::new(),
            source: String::new(),
        }
    }

    /// URL of the current page, empty before the first navigation.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Navigate to a URL and remember its document source.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.source = self.client.get(url).send().await?.text().await?;
        self.url = url.to_string();
        Ok(())
    }

    /// Re-fetch the current page in place.
    async fn refresh(&mut self) -> Result<()> {
        self.source = self.client.get(&self.url).send().await?.text().await?;
        Ok(())
    }

    /// Wait until `selector` matches at least one element on the current
    /// page, re-fetching at the poll interval, up to the wait timeout.
    ///
    /// `selector_src` is the selector's source text, used for error context.
    pub async fn wait_for(&mut self, selector: &Selector, selector_src: &str) -> Result<()> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            {
                let document = self.document();
                if document.select(selector).next().is_some() {
                    return Ok(());
                }
            }

            if Instant::now() >= deadline {
                return Err(AppError::WaitTimeout {
                    url: self.url.clone(),
                    selector: selector_src.to_string(),
                    timeout_secs: self.wait_timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
            self.refresh().await?;
        }
    }

    /// Parse the current page source. Parsed on demand so the session
    /// itself stays `Send` across await points.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.source)
    }
}
