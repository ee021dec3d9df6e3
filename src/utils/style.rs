// src/utils/style.rs

//! Inline style attribute parsing.

use std::sync::OnceLock;

use regex::Regex;

/// Matches the first url(...) token, with or without quotes.
fn background_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?([^'")\s]+)['"]?\s*\)"#).expect("valid regex")
    })
}

/// Extract the image URL from a `background-image` style attribute value.
///
/// Returns `None` when the style carries no url(...) token; callers treat
/// a missing preview image as non-fatal.
pub fn background_image_url(style: &str) -> Option<String> {
    background_image_re()
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted() {
        let style = r#"background-image: url("https://cdn.example.com/a.png");"#;
        assert_eq!(
            background_image_url(style),
            Some("https://cdn.example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_single_quoted_and_unquoted() {
        assert_eq!(
            background_image_url("background-image:url('https://x.test/b.jpg')"),
            Some("https://x.test/b.jpg".to_string())
        );
        assert_eq!(
            background_image_url("background-image:url(https://x.test/c.jpg)"),
            Some("https://x.test/c.jpg".to_string())
        );
    }

    #[test]
    fn test_no_url_token() {
        assert_eq!(background_image_url("color: red;"), None);
        assert_eq!(background_image_url(""), None);
    }
}
