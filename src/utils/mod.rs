// src/utils/mod.rs

//! Utility functions and helpers.

pub mod style;

use scraper::Selector;
use url::Url;

use crate::error::{AppError, Result};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Parse a CSS selector, mapping failures to a selector error.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/news/").unwrap();
        assert_eq!(
            resolve_url(&base, "post.html"),
            "https://example.com/news/post.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.class").is_ok());
        assert!(parse_selector("a[href]").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }
}
