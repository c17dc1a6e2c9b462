use crate::types::{CountryConfig, PriceResult, PRICE_UNAVAILABLE};
use url::Url;

/// Path words that identify a product when the page itself is unreachable
const NAME_TOKENS: &[&str] = &["samsung", "galaxy", "s24", "iphone", "apple"];

/// Derives a price-less result from a product URL alone
///
/// Used when a product page could not be reached at all. The product name is
/// recovered from recognizable path words; `None` when there are none.
pub fn extract_basic_info_from_url(url: &str, country: &CountryConfig) -> Option<PriceResult> {
    let parsed = Url::parse(url).ok()?;
    let website = parsed.host_str()?.to_lowercase();
    let path = parsed.path().to_lowercase();

    let product_name = if path.contains("samsung") && path.contains("galaxy-s24") {
        "Samsung Galaxy S24".to_string()
    } else if path.contains("samsung") && path.contains("s24") {
        "Samsung S24".to_string()
    } else if path.contains("iphone") {
        "iPhone".to_string()
    } else {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| NAME_TOKENS.iter().any(|token| segment.contains(token)))
            .collect();
        segments.join(" ").replace(['-', '_'], " ")
    };

    if product_name.is_empty() {
        return None;
    }

    let result = PriceResult::new(url, PRICE_UNAVAILABLE, product_name, website.as_str(), country)
        .with_annotations([
            format!("Platform: {}", website),
            format!("Country: {}", country.code),
            format!("Currency: {}", country.currency),
            "Source: URL Analysis".to_string(),
            "Note: Price not available due to site access issues".to_string(),
        ]);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn india() -> CountryConfig {
        CountryConfig {
            code: "IN".to_string(),
            currency: "INR".to_string(),
        }
    }

    fn name_for(url: &str) -> Option<String> {
        extract_basic_info_from_url(url, &india()).map(|r| r.product_name)
    }

    #[test]
    fn test_named_products() {
        assert_eq!(
            name_for("https://www.samsung.com/in/smartphones/samsung-galaxy-s24/buy/").as_deref(),
            Some("Samsung Galaxy S24")
        );
        assert_eq!(
            name_for("https://www.amazon.in/Samsung-Mobile-S24-Black/dp/B0CS").as_deref(),
            Some("Samsung S24")
        );
        assert_eq!(
            name_for("https://www.flipkart.com/apple-iPhone-15/p/itm").as_deref(),
            Some("iPhone")
        );
    }

    #[test]
    fn test_segment_fallback() {
        assert_eq!(
            name_for("https://www.apple.com/in/shop/buy-mac/apple_watch-ultra").as_deref(),
            Some("apple watch ultra")
        );
        assert_eq!(
            name_for("https://store.example.com/galaxy-buds/case").as_deref(),
            Some("galaxy buds")
        );
    }

    #[test]
    fn test_unrecognized_url() {
        assert_eq!(name_for("https://www.example.com/products/kettle"), None);
        assert_eq!(name_for("not a url"), None);
    }

    #[test]
    fn test_stub_fields() {
        let result =
            extract_basic_info_from_url("https://www.croma.com/apple-iphone-15/p/300", &india())
                .unwrap();
        assert_eq!(result.price, PRICE_UNAVAILABLE);
        assert_eq!(result.website, "www.croma.com");
        assert_eq!(result.currency, "INR");
        assert_eq!(result.rating, None);
        assert_eq!(result.annotations[0], "Platform: www.croma.com");
        assert_eq!(result.annotations[3], "Source: URL Analysis");
        assert_eq!(
            result.annotations[4],
            "Note: Price not available due to site access issues"
        );
    }
}
