use super::html::{all_text, first_attr, first_number, first_text};
use super::platforms::rating_note;
use crate::locale::{detect_country_from_url, LocaleResolver};
use crate::types::{CountryConfig, PriceResult};
use scraper::Html;
use url::Url;

const TITLE_SELECTOR: &str = r#"h1, .product-title, .title, [data-testid="product-title"]"#;
const PRICE_SELECTOR: &str =
    r#".price, .cost, [class*="price"], [data-testid="price"], .current-price"#;
const RATING_SELECTOR: &str = r#".rating, .stars, [data-testid="rating"]"#;
const IMAGE_SELECTOR: &str =
    r#".product-image img, .main-image img, [data-testid="product-image"] img"#;

/// Price texts that belong to promotional banners, not to the product
const PROMO_PRICE_MARKERS: &[&str] = &["save up to", "trade-in"];

/// Extracts a single product from a product-detail page
///
/// Returns `None` when the page has no title or price, or when it looks like a
/// storefront or promotion rather than a product.
pub fn parse_product_detail(
    html: &str,
    url: &str,
    country: Option<&CountryConfig>,
    locale: &LocaleResolver,
) -> Option<PriceResult> {
    let website = Url::parse(url).ok()?.host_str()?.to_string();

    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = first_text(root, TITLE_SELECTOR);
    let price = first_text(root, PRICE_SELECTOR);

    if title.is_empty() || price.is_empty() {
        tracing::debug!("No title or price on {}", url);
        return None;
    }
    let lower_price = price.to_lowercase();
    if title.to_lowercase().contains("shop")
        || PROMO_PRICE_MARKERS.iter().any(|m| lower_price.contains(m))
    {
        tracing::debug!("Skipping non-product page {}", url);
        return None;
    }

    let rating = first_number(&all_text(root, RATING_SELECTOR));
    let image_url = first_attr(root, IMAGE_SELECTOR, "src");

    let country = match country {
        Some(country) => country.clone(),
        None => {
            let code = detect_country_from_url(url);
            CountryConfig {
                code: code.to_string(),
                currency: locale.currency_for(code).to_string(),
            }
        }
    };

    let mut result = PriceResult::new(url, price, title, website.as_str(), &country)
        .with_annotations([
            rating_note(rating),
            format!("Platform: {}", website),
            format!("Country: {}", country.code),
            format!("Currency: {}", country.currency),
            format!("Website: {}", website),
        ]);
    result.rating = rating;
    result.image_url = image_url;

    Some(result)
}
