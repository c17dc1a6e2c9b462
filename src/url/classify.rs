//! Heuristic URL gates
//!
//! Every check is a case-insensitive substring test against a fixed vocabulary.
//! The vocabularies are deliberately coarse: "ad" matches "download" and
//! "headphones" too, and callers rely on exactly that behavior.

/// Markers of sponsored placements and click tracking
const AD_MARKERS: &[&str] = &[
    "ad_domain=",
    "ad_provider=",
    "ad_type=",
    "click_metadata=",
    "aclick",
    "bing.com/aclick",
    "duckduckgo.com/y.js",
    "sponsored",
    "ad",
    "ads",
    "advertisement",
    "utm_source=",
    "utm_medium=",
    "utm_campaign=",
    "gclid=",
    "fbclid=",
    "msclkid=",
];

/// At least one of these must appear in a product URL
const PRODUCT_KEYWORDS: &[&str] = &[
    "product", "item", "buy", "shop", "store", "amazon", "walmart", "ebay", "flipkart",
    "bestbuy", "target",
];

/// None of these may appear in a product URL
const LISTING_KEYWORDS: &[&str] = &[
    "search", "category", "list", "results", "compare", "review", "/s?", "/sch/",
];

/// Known storefronts and product-page path shapes
const STOREFRONT_MARKERS: &[&str] = &[
    "amazon",
    "walmart",
    "ebay",
    "flipkart",
    "bestbuy",
    "target",
    "apple.com/shop",
    "samsung.com",
    "product",
    "/p/",
    "/item/",
];

/// Listing-page markers, checked on DuckDuckGo hits only
const SEARCH_PAGE_MARKERS: &[&str] = &[
    "/s?",
    "/search?",
    "/sch/",
    "/results",
    "/list",
    "/category",
    "keyword=",
    "searchterm=",
    "q=",
    "query=",
    "search=",
    "results for",
    "over",
    "results",
    "sort by",
    "filter",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Returns true for sponsored or click-tracked links
pub fn is_ad_link(url: &str) -> bool {
    contains_any(&url.to_lowercase(), AD_MARKERS)
}

/// Returns true when a URL looks like a single product page
///
/// All three must hold: a product keyword is present, no listing keyword is
/// present, and the URL names a known storefront or a product-path shape.
///
/// # Examples
///
/// ```
/// use price_scout::url::is_product_url;
///
/// assert!(is_product_url("https://www.amazon.com/dp/B0C"));
/// assert!(!is_product_url("https://www.amazon.com/s?k=phone"));
/// assert!(!is_product_url("https://example.com/about"));
/// ```
pub fn is_product_url(url: &str) -> bool {
    let lower = url.to_lowercase();

    contains_any(&lower, PRODUCT_KEYWORDS)
        && !contains_any(&lower, LISTING_KEYWORDS)
        && contains_any(&lower, STOREFRONT_MARKERS)
}

/// Returns true when a URL looks like a search or listing page
pub fn is_search_result_page(url: &str) -> bool {
    contains_any(&url.to_lowercase(), SEARCH_PAGE_MARKERS)
}
