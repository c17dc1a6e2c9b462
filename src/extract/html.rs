//! HTML and text helpers shared by the extractors
//!
//! All functions here are synchronous. A parsed [`scraper::Html`] is not `Send`,
//! so documents are parsed and fully consumed inside these helpers and never
//! held across an await point.

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;
use url::Url;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+\.?\d*)").expect("valid number regex"))
}

fn leading_float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)").expect("valid float regex"))
}

/// Parses a CSS selector, logging instead of failing on bad syntax
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Trimmed text of the first descendant matching `css`, empty when none match
pub fn first_text(scope: ElementRef<'_>, css: &str) -> String {
    selector(css)
        .and_then(|sel| scope.select(&sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Concatenated text of every descendant matching `css`, trimmed
pub fn all_text(scope: ElementRef<'_>, css: &str) -> String {
    let Some(sel) = selector(css) else {
        return String::new();
    };
    scope
        .select(&sel)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Attribute of the first descendant matching `css`
///
/// Like a jQuery-style `.attr()` lookup, only the first match is consulted even
/// if it lacks the attribute.
pub fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let sel = selector(css)?;
    scope
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Turns empty strings into `None`
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First decimal number appearing anywhere in the text ("4.5 out of 5" gives 4.5)
pub fn first_number(text: &str) -> Option<f64> {
    number_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the longest numeric prefix of the text, ignoring leading whitespace
///
/// "1299.99.5" gives 1299.99 and "abc" gives `None`.
pub fn leading_float(text: &str) -> Option<f64> {
    leading_float_re()
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

/// Every decimal digit in the text as one integer ("1,234 ratings" gives 1234)
pub fn digits_only(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}

/// Origin URL for a website entry
///
/// Bare hosts ("amazon.in") are served over HTTPS. Entries that already carry a
/// scheme are used as given, which lets a deployment point a platform at a
/// mirror or a local stub.
pub fn site_origin(website: &str) -> String {
    if website.contains("://") {
        website.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", website)
    }
}

/// Base URL against which a site's relative links are resolved
pub fn site_base(website: &str) -> Option<Url> {
    Url::parse(&format!("{}/", site_origin(website))).ok()
}
