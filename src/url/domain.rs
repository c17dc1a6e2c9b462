use crate::locale::LocaleResolver;
use url::Url;

/// Hosts that show up in search results but never sell anything
const EXCLUDED_HOSTS: &[&str] = &[
    "google.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
];

/// Global platforms whose `.com` storefront has per-country counterparts
const REGIONAL_PLATFORMS: &[(&str, &str)] = &[
    ("amazon.com", "amazon"),
    ("walmart.com", "walmart"),
    ("ebay.com", "ebay"),
    ("bestbuy.com", "bestbuy"),
];

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use price_scout::url::extract_domain;
///
/// let url = Url::parse("https://WWW.Amazon.com/dp/B0C").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.amazon.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when a candidate should not be visited
///
/// Social and search hosts are excluded, and so is anything that does not
/// parse as an absolute URL with a host.
pub fn is_excluded_host(url: &str) -> bool {
    let Some(host) = Url::parse(url).ok().as_ref().and_then(extract_domain) else {
        return true;
    };

    EXCLUDED_HOSTS.iter().any(|excluded| host.contains(excluded))
}

/// Rewrites a global storefront URL onto the requested country's domain
///
/// Only amazon.com, walmart.com, ebay.com and bestbuy.com are rewritten, and only
/// for countries other than US. A URL that does not parse, or a platform with no
/// domain in that market, comes back unchanged.
///
/// # Examples
///
/// ```
/// use price_scout::config::load_default_config;
/// use price_scout::url::convert_url_to_country_domain;
/// use price_scout::LocaleResolver;
///
/// let locale = LocaleResolver::new(&load_default_config().unwrap());
/// assert_eq!(
///     convert_url_to_country_domain("https://www.amazon.com/dp/B0C", "IN", &locale),
///     "https://amazon.in/dp/B0C"
/// );
/// ```
pub fn convert_url_to_country_domain(url: &str, country: &str, locale: &LocaleResolver) -> String {
    if country.eq_ignore_ascii_case("US") {
        return url.to_string();
    }

    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = extract_domain(&parsed) else {
        return url.to_string();
    };

    let Some(platform) = REGIONAL_PLATFORMS
        .iter()
        .find(|(global, _)| host.contains(global))
        .map(|(_, platform)| *platform)
    else {
        return url.to_string();
    };

    match locale.country_domain(platform, country) {
        Some(domain) if parsed.set_host(Some(domain)).is_ok() => parsed.to_string(),
        _ => url.to_string(),
    }
}
