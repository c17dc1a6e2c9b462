//! Brand homepage scanning
//!
//! Brand sites have no search page we know how to drive, so their homepage is
//! scanned for links whose surrounding text mentions the query. Three passes
//! run in order, each bounded to a fixed number of elements:
//!
//! 1. product-ish anchors (`/product`, `/shop`, `/catalog` ...) with matching text
//! 2. heading-like elements with matching text, using the enclosing anchor
//! 3. generic text blocks with matching text, using their first inner anchor

use super::html::{first_attr, resolve_link, selector, site_base};
use scraper::{ElementRef, Html};
use std::collections::HashSet;

const PRODUCT_ANCHORS: &str = r#"a[href*="/product"], a[href*="/item"], a[href*="/shop"], a[href*="/buy"], a[href*="/store"], a[href*="/catalog"]"#;
const HEADINGS: &str =
    "h1, h2, h3, h4, .title, .product-title, .name, .product-name, .item-title";
const TEXT_BLOCKS: &str = "p, div, span";

const MAX_PRODUCT_ANCHORS: usize = 15;
const MAX_HEADINGS: usize = 10;
const MAX_TEXT_BLOCKS: usize = 50;

/// Collects candidate product URLs from a brand homepage
///
/// Returned URLs are absolute, deduplicated and in discovery order.
pub fn scan_brand_homepage(html: &str, website: &str, query: &str) -> Vec<String> {
    let Some(base) = site_base(website) else {
        return Vec::new();
    };
    let keywords = query_keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let mentions = |el: &ElementRef<'_>| {
        let text = el.text().collect::<String>().to_lowercase();
        keywords.iter().any(|k| text.contains(k.as_str()))
    };

    let mut hrefs = Vec::new();

    if let Some(sel) = selector(PRODUCT_ANCHORS) {
        hrefs.extend(
            document
                .select(&sel)
                .take(MAX_PRODUCT_ANCHORS)
                .filter(|a| mentions(a))
                .filter_map(|a| a.value().attr("href").map(str::to_string)),
        );
    }

    if let Some(sel) = selector(HEADINGS) {
        hrefs.extend(
            document
                .select(&sel)
                .take(MAX_HEADINGS)
                .filter(|heading| mentions(heading))
                .filter_map(|heading| enclosing_anchor(&heading))
                .filter_map(|a| a.value().attr("href").map(str::to_string)),
        );
    }

    if let Some(sel) = selector(TEXT_BLOCKS) {
        hrefs.extend(
            document
                .select(&sel)
                .take(MAX_TEXT_BLOCKS)
                .filter(|block| mentions(block))
                .filter_map(|block| first_attr(block, "a", "href")),
        );
    }

    let mut seen = HashSet::new();
    let urls: Vec<String> = hrefs
        .iter()
        .filter_map(|href| resolve_link(href, &base))
        .filter(|url| seen.insert(url.clone()))
        .collect();

    tracing::info!("Found {} unique product URLs on {}", urls.len(), website);
    urls
}

/// Lowercased query words longer than two characters
fn query_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// The element itself if it is an anchor, else its nearest anchor ancestor
fn enclosing_anchor<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    if el.value().name() == "a" {
        return Some(*el);
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}
