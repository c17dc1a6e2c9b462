use url::Url;

/// Reduces a URL to `scheme://host/path`
///
/// Marketplace item links carry long tracking query strings and fragments that
/// differ on every page load. Dropping both gives a stable link to the listing.
/// Input that does not parse is returned as-is.
///
/// # Examples
///
/// ```
/// use price_scout::url::strip_tracking;
///
/// assert_eq!(
///     strip_tracking("https://www.ebay.com/itm/1234?hash=item1c&_trkparms=abc#tab"),
///     "https://www.ebay.com/itm/1234"
/// );
/// ```
pub fn strip_tracking(url_str: &str) -> String {
    let Ok(mut url) = Url::parse(url_str) else {
        return url_str.to_string();
    };

    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}
