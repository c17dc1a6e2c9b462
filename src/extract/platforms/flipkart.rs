use super::{rating_note, SearchResultsParser, MAX_CARDS};
use crate::extract::html::{
    all_text, first_attr, leading_float, non_empty, resolve_link, selector, site_base,
};
use crate::types::{CountryConfig, PriceResult};
use scraper::Html;

/// Flipkart search results (`[data-tkid]` cards with obfuscated class names)
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipkartParser;

impl SearchResultsParser for FlipkartParser {
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let (Some(cards), Some(base)) = (selector("[data-tkid]"), site_base(website)) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for card in document.select(&cards).take(MAX_CARDS) {
            let title = all_text(card, "._4rR01T");
            let price = all_text(card, "._30jeq3");
            if title.is_empty() || price.is_empty() {
                continue;
            }

            let link = first_attr(card, "a", "href")
                .and_then(|href| resolve_link(&href, &base))
                .unwrap_or_else(|| base.to_string());
            let rating = leading_float(&all_text(card, "._3LWZlK"));

            let mut result = PriceResult::new(link, price, title, website, country)
                .with_annotations([
                    rating_note(rating),
                    "Platform: Flipkart".to_string(),
                    format!("Country: {}", country.code),
                    format!("Currency: {}", country.currency),
                    format!("Website: {}", website),
                ]);
            result.rating = rating;
            result.image_url = first_attr(card, "img", "src");
            result.original_price = non_empty(all_text(card, "._3I9_wc"));
            result.discount = non_empty(all_text(card, "._3Ay6Sb"));

            results.push(result);
        }

        results
    }
}
