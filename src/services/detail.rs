// src/services/detail.rs

//! Detail page extraction service.
//!
//! Fetches a single detail page, waits for its labeled regions, and
//! normalizes title, timestamp, and body into an [`Update`].

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlerConfig, SelectorConfig, Update};
use crate::session::Session;
use crate::utils::parse_selector;

/// Compiled selectors for detail pages.
pub(crate) struct DetailSelectors {
    pub title: Selector,
    pub title_src: String,
    pub date: Selector,
    pub body: Selector,
}

impl DetailSelectors {
    pub(crate) fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            title: parse_selector(&config.title)?,
            title_src: config.title.clone(),
            date: parse_selector(&config.date)?,
            body: parse_selector(&config.body)?,
        })
    }
}

/// Text content of the first match, trimmed.
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Extract an update from a loaded detail page.
///
/// All three labeled regions are required; any absence fails the entry.
pub(crate) fn parse_detail(
    document: &Html,
    selectors: &DetailSelectors,
    link: &str,
) -> Result<Update> {
    let title = select_text(document, &selectors.title)
        .ok_or_else(|| AppError::extract(link, "title region missing"))?;
    let timestamp = select_text(document, &selectors.date)
        .ok_or_else(|| AppError::extract(link, "timestamp region missing"))?;
    let body = select_text(document, &selectors.body)
        .ok_or_else(|| AppError::extract(link, "body region missing"))?;

    Ok(Update::from_detail(&timestamp, &title, &body, link))
}

/// Service that extracts one detail page per call.
pub struct DetailFetcher {
    client: Client,
    crawler: CrawlerConfig,
    selectors: DetailSelectors,
}

impl DetailFetcher {
    /// Create a fetcher sharing the run's HTTP client.
    pub fn new(config: &Config, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            crawler: config.crawler.clone(),
            selectors: DetailSelectors::compile(&config.selectors)?,
        })
    }

    /// Fetch and extract a single detail page.
    ///
    /// Opens a fresh page session per call so concurrent fetches never
    /// share page state. Every failure mode maps to a per-entry
    /// extraction error; callers decide whether to continue.
    pub async fn fetch_detail(&self, link: &str) -> Result<Update> {
        let mut session = Session::new(self.client.clone(), &self.crawler);

        session
            .goto(link)
            .await
            .map_err(|e| AppError::extract(link, e))?;
        session
            .wait_for(&self.selectors.title, &self.selectors.title_src)
            .await
            .map_err(|e| AppError::extract(link, e))?;

        let document = session.document();
        parse_detail(&document, &self.selectors, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity;

    fn test_selectors() -> DetailSelectors {
        let config = SelectorConfig {
            title: "h1.title".to_string(),
            date: ".posted-at".to_string(),
            body: ".post-body".to_string(),
            ..SelectorConfig::default()
        };
        DetailSelectors::compile(&config).unwrap()
    }

    const LINK: &str = "https://news.example.com/posts/1";

    #[test]
    fn test_parse_detail_composes_update() {
        let html = r#"
            <h1 class="title">  Summer Update  </h1>
            <span class="posted-at"> 2026-08-01 </span>
            <div class="post-body">
              New maps. <b>New</b> weapons.
            </div>
        "#;
        let document = Html::parse_document(html);
        let update = parse_detail(&document, &test_selectors(), LINK).unwrap();

        assert_eq!(update.timestamp, "2026-08-01");
        assert!(update.entry.starts_with("Summer Update\n\n"));
        assert!(update.entry.contains("New maps."));
        assert_eq!(update.link, LINK);
        assert_eq!(update.id, identity::update_id("2026-08-01", "Summer Update"));
    }

    #[test]
    fn test_parse_detail_missing_body_fails() {
        let html = r#"
            <h1 class="title">Summer Update</h1>
            <span class="posted-at">2026-08-01</span>
        "#;
        let document = Html::parse_document(html);
        let result = parse_detail(&document, &test_selectors(), LINK);

        match result {
            Err(AppError::Extract { link, message }) => {
                assert_eq!(link, LINK);
                assert!(message.contains("body"));
            }
            other => panic!("expected extract error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_detail_missing_title_fails() {
        let html = r#"<span class="posted-at">2026-08-01</span><div class="post-body">x</div>"#;
        let document = Html::parse_document(html);
        assert!(parse_detail(&document, &test_selectors(), LINK).is_err());
    }

    #[test]
    fn test_parse_detail_uses_first_match() {
        let html = r#"
            <h1 class="title">First</h1>
            <h1 class="title">Second</h1>
            <span class="posted-at">2026-08-01</span>
            <div class="post-body">x</div>
        "#;
        let document = Html::parse_document(html);
        let update = parse_detail(&document, &test_selectors(), LINK).unwrap();
        assert!(update.entry.starts_with("First\n\n"));
    }
}
