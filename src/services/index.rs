// src/services/index.rs

//! Index traversal service.
//!
//! Walks the paginated news index, collecting entry links and preview
//! images from each page until the next-page control reports the end.

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, EntryRef, SelectorConfig};
use crate::session::Session;
use crate::utils::{parse_selector, resolve_url, style};

/// Compiled selectors for index pages.
pub(crate) struct IndexSelectors {
    pub entry: Selector,
    pub entry_src: String,
    pub image: Selector,
    pub next: Selector,
    pub link_attr: String,
    pub disabled_attr: String,
}

impl IndexSelectors {
    pub(crate) fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            entry: parse_selector(&config.entry)?,
            entry_src: config.entry.clone(),
            image: parse_selector(&config.entry_image)?,
            next: parse_selector(&config.next)?,
            link_attr: config.link_attr.clone(),
            disabled_attr: config.next_disabled_attr.clone(),
        })
    }
}

/// What the pagination control on a page says about continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NextPage {
    /// No next-page control on the page
    End,
    /// Control present but marked disabled or unusable
    Disabled,
    /// Control enabled; follow this absolute URL
    Follow(String),
}

/// Entries and pagination decision scanned from one index page.
pub(crate) struct PageScan {
    pub refs: Vec<EntryRef>,
    pub next: NextPage,
}

/// Scan one index page for entry references and the next-page decision.
pub(crate) fn scan_page(document: &Html, selectors: &IndexSelectors, base: &Url) -> PageScan {
    let mut refs = Vec::new();

    for summary in document.select(&selectors.entry) {
        let Some(href) = summary.value().attr(&selectors.link_attr) else {
            continue;
        };
        let link = resolve_url(base, href);

        // A missing preview image is not fatal to the entry.
        let image_url = summary
            .select(&selectors.image)
            .next()
            .and_then(|el| el.value().attr("style"))
            .and_then(style::background_image_url);

        refs.push(EntryRef { link, image_url });
    }

    PageScan {
        refs,
        next: next_page(document, selectors, base),
    }
}

fn next_page(document: &Html, selectors: &IndexSelectors, base: &Url) -> NextPage {
    let Some(control) = document.select(&selectors.next).next() else {
        return NextPage::End;
    };

    if let Some(state) = control.value().attr(&selectors.disabled_attr) {
        if !state.eq_ignore_ascii_case("false") {
            return NextPage::Disabled;
        }
    }

    match control.value().attr(&selectors.link_attr) {
        Some(href) if !href.trim().is_empty() => NextPage::Follow(resolve_url(base, href)),
        // Present but inert controls end the traversal too.
        _ => NextPage::Disabled,
    }
}

/// Service that walks the paginated index once.
pub struct IndexTraverser {
    index_url: String,
    max_pages: usize,
    session: Session,
    selectors: IndexSelectors,
}

impl IndexTraverser {
    /// Create a traverser with its own page session.
    pub fn new(config: &Config, client: Client) -> Result<Self> {
        Ok(Self {
            index_url: config.source.index_url.clone(),
            max_pages: config.crawler.max_pages.max(1),
            session: Session::new(client, &config.crawler),
            selectors: IndexSelectors::compile(&config.selectors)?,
        })
    }

    /// Walk the index and collect every entry reference, deduplicated by
    /// link in first-seen order. Consumes the traverser; a run traverses
    /// the index exactly once.
    ///
    /// Failure to produce any entries on the first page aborts the run;
    /// failures on later pages end pagination with what was collected.
    pub async fn collect(mut self) -> Result<Vec<EntryRef>> {
        let mut refs: Vec<EntryRef> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = 0usize;
        let mut target = self.index_url.clone();

        loop {
            if let Err(error) = self.session.goto(&target).await {
                if pages == 0 {
                    return Err(AppError::index_load(&target, error));
                }
                log::warn!("Navigation to {target} failed; stopping pagination: {error}");
                break;
            }

            let waited = self
                .session
                .wait_for(&self.selectors.entry, &self.selectors.entry_src)
                .await;
            if let Err(error) = waited {
                if pages == 0 {
                    return Err(AppError::index_load(self.session.url(), error));
                }
                log::warn!(
                    "No entries appeared at {}; stopping pagination: {error}",
                    self.session.url()
                );
                break;
            }
            pages += 1;

            let base = Url::parse(self.session.url())
                .map_err(|e| AppError::index_load(self.session.url(), e))?;
            let scan = {
                let document = self.session.document();
                scan_page(&document, &self.selectors, &base)
            };

            for entry in scan.refs {
                if seen.insert(entry.link.clone()) {
                    refs.push(entry);
                }
            }

            match scan.next {
                NextPage::End => {
                    log::debug!("No next-page control on {}", self.session.url());
                    break;
                }
                NextPage::Disabled => {
                    log::debug!("Next-page control disabled on {}", self.session.url());
                    break;
                }
                NextPage::Follow(href) => {
                    if pages >= self.max_pages {
                        log::warn!(
                            "Reached the {}-page safety limit; stopping pagination",
                            self.max_pages
                        );
                        break;
                    }
                    target = href;
                }
            }
        }

        log::info!("Collected {} entries from {} index pages", refs.len(), pages);
        Ok(refs)
    }
}
