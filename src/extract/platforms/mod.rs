//! Marketplace search-results parsers
//!
//! Each platform with a known search page gets a parser keyed by hostname.
//! Platforms without a dedicated parser fall back to [`GenericParser`].

mod amazon;
mod ebay;
mod flipkart;
mod generic;
mod walmart;

pub use amazon::AmazonParser;
pub use ebay::EbayParser;
pub use flipkart::FlipkartParser;
pub use generic::GenericParser;
pub use walmart::WalmartParser;

use crate::types::{CountryConfig, PriceResult};
use crate::url::encode_component;
use std::fmt;

/// Maximum result cards read from one marketplace search page
pub const MAX_CARDS: usize = 10;

const AMAZON_DOMAINS: &[&str] = &[
    "amazon.com",
    "amazon.in",
    "amazon.co.uk",
    "amazon.ca",
    "amazon.de",
    "amazon.fr",
    "amazon.com.au",
];
const WALMART_DOMAINS: &[&str] = &["walmart.com", "walmart.ca"];
const FLIPKART_DOMAINS: &[&str] = &["flipkart.com"];
const EBAY_DOMAINS: &[&str] = &[
    "ebay.com",
    "ebay.co.uk",
    "ebay.ca",
    "ebay.de",
    "ebay.fr",
    "ebay.com.au",
];
const BESTBUY_DOMAINS: &[&str] = &["bestbuy.com", "bestbuy.ca"];
const TARGET_DOMAINS: &[&str] = &["target.com", "target.com.au"];

/// Parses one marketplace's search-results page
pub trait SearchResultsParser: Send + Sync {
    /// Extracts priced results from the page
    ///
    /// `website` is the marketplace entry as configured and is used both as the
    /// result's `website` and as the base for relative links.
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult>;
}

/// Marketplaces with a dedicated results parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Amazon,
    Walmart,
    Flipkart,
    Ebay,
    Generic,
}

impl Platform {
    /// Picks the parser for a website, [`Platform::Generic`] when unknown
    pub fn for_website(website: &str) -> Self {
        let host = host_of(website);
        if AMAZON_DOMAINS.contains(&host) {
            Self::Amazon
        } else if WALMART_DOMAINS.contains(&host) {
            Self::Walmart
        } else if FLIPKART_DOMAINS.contains(&host) {
            Self::Flipkart
        } else if EBAY_DOMAINS.contains(&host) {
            Self::Ebay
        } else {
            Self::Generic
        }
    }

    pub fn parser(&self) -> &'static dyn SearchResultsParser {
        match self {
            Self::Amazon => &AmazonParser,
            Self::Walmart => &WalmartParser,
            Self::Flipkart => &FlipkartParser,
            Self::Ebay => &EbayParser,
            Self::Generic => &GenericParser,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Amazon => "Amazon",
            Self::Walmart => "Walmart",
            Self::Flipkart => "Flipkart",
            Self::Ebay => "eBay",
            Self::Generic => "Generic",
        };
        f.write_str(name)
    }
}

/// Builds the marketplace's own search URL for a query
///
/// Returns `None` for websites without a known search page. Those are treated
/// as brand sites and scanned from their homepage instead.
///
/// # Examples
///
/// ```
/// use price_scout::extract::platforms::search_url;
///
/// assert_eq!(
///     search_url("ebay.co.uk", "galaxy s24").as_deref(),
///     Some("https://ebay.co.uk/sch/i.html?_nkw=galaxy%20s24")
/// );
/// assert_eq!(search_url("sony.com", "headphones"), None);
/// ```
pub fn search_url(website: &str, query: &str) -> Option<String> {
    let host = host_of(website);
    let path = if AMAZON_DOMAINS.contains(&host) {
        "/s?k="
    } else if WALMART_DOMAINS.contains(&host) || FLIPKART_DOMAINS.contains(&host) {
        "/search?q="
    } else if EBAY_DOMAINS.contains(&host) {
        "/sch/i.html?_nkw="
    } else if BESTBUY_DOMAINS.contains(&host) {
        "/site/searchpage.jsp?st="
    } else if TARGET_DOMAINS.contains(&host) {
        "/search?searchTerm="
    } else {
        return None;
    };

    Some(format!(
        "{}{}{}",
        super::html::site_origin(website),
        path,
        encode_component(query)
    ))
}

/// Returns true for websites that are scanned as brand homepages
pub fn is_brand_website(website: &str) -> bool {
    search_url(website, "").is_none()
}

/// Host part of a website entry, which may be a bare host or a full origin
fn host_of(website: &str) -> &str {
    let rest = website
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(website);
    rest.split('/').next().unwrap_or(rest)
}

/// Display annotations shared by the marketplace parsers
pub(crate) fn rating_note(rating: Option<f64>) -> String {
    format!("Rating: {}/5", rating.unwrap_or(0.0))
}
