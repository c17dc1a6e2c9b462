use super::{SearchResultsParser, MAX_CARDS};
use crate::extract::html::{
    all_text, first_attr, non_empty, resolve_link, selector, site_base,
};
use crate::types::{CountryConfig, PriceResult};
use scraper::Html;

/// Walmart search results (`[data-item-id]` tiles)
#[derive(Debug, Clone, Copy, Default)]
pub struct WalmartParser;

impl SearchResultsParser for WalmartParser {
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let (Some(tiles), Some(base)) = (selector("[data-item-id]"), site_base(website)) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for tile in document.select(&tiles).take(MAX_CARDS) {
            let title = all_text(tile, r#"[data-testid="product-title"]"#);
            let price = all_text(tile, r#"[data-testid="price-wrap"] .price-main"#);
            if title.is_empty() || price.is_empty() {
                continue;
            }

            let link = first_attr(tile, "a", "href")
                .and_then(|href| resolve_link(&href, &base))
                .unwrap_or_else(|| base.to_string());

            let mut result = PriceResult::new(link, price, title, website, country)
                .with_annotations([
                    "Platform: Walmart".to_string(),
                    format!("Country: {}", country.code),
                    format!("Currency: {}", country.currency),
                    "Availability: In Stock".to_string(),
                    format!("Website: {}", website),
                ]);
            result.image_url = first_attr(tile, "img", "src");
            result.original_price = non_empty(all_text(tile, ".price-old"));
            result.discount = non_empty(all_text(tile, ".price-save"));

            results.push(result);
        }

        results
    }
}
