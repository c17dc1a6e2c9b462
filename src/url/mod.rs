//! URL handling module for Price-Scout
//!
//! This module provides redirect unwrapping, product/listing/ad classification,
//! country-domain rewriting, host pattern matching and query-component encoding.

mod classify;
mod domain;
mod matcher;
mod normalize;
mod redirect;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Re-export main functions
pub use classify::{is_ad_link, is_product_url, is_search_result_page};
pub use domain::{convert_url_to_country_domain, extract_domain, is_excluded_host};
pub use matcher::matches_wildcard;
pub use normalize::strip_tracking;
pub use redirect::decode_redirect;

/// Characters left unescaped in a URI component: alphanumerics plus `-_.!~*'()`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes text for use as a single query-parameter value
///
/// # Examples
///
/// ```
/// use price_scout::url::encode_component;
///
/// assert_eq!(encode_component("galaxy s24 & case"), "galaxy%20s24%20%26%20case");
/// ```
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}
