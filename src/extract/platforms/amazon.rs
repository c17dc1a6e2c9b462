use super::{rating_note, SearchResultsParser, MAX_CARDS};
use crate::extract::html::{
    all_text, digits_only, first_attr, first_number, first_text, non_empty, resolve_link,
    selector, site_base,
};
use crate::types::{CountryConfig, PriceResult};
use scraper::Html;

/// Amazon search results (`[data-component-type="s-search-result"]` cards)
#[derive(Debug, Clone, Copy, Default)]
pub struct AmazonParser;

impl SearchResultsParser for AmazonParser {
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let (Some(cards), Some(base)) = (
            selector(r#"[data-component-type="s-search-result"]"#),
            site_base(website),
        ) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for card in document.select(&cards).take(MAX_CARDS) {
            let title = first_text(card, "h2 a span");
            let price = all_text(card, ".a-price-whole");
            if title.is_empty() || price.is_empty() {
                continue;
            }

            let link = first_attr(card, "h2 a", "href")
                .and_then(|href| resolve_link(&href, &base))
                .unwrap_or_else(|| base.to_string());
            let rating = first_number(&all_text(card, ".a-icon-alt"));
            let review_count = digits_only(&all_text(card, ".a-size-base"));

            let mut result = PriceResult::new(link, price, title, website, country)
                .with_annotations([
                    rating_note(rating),
                    format!("Reviews: {}", review_count.unwrap_or(0)),
                    "Platform: Amazon".to_string(),
                    format!("Country: {}", country.code),
                    format!("Currency: {}", country.currency),
                ]);
            result.rating = rating;
            result.review_count = review_count;
            result.image_url = first_attr(card, "img.s-image", "src");
            result.original_price = non_empty(all_text(card, ".a-text-strike"));
            result.discount = non_empty(all_text(card, ".a-badge-text"));

            results.push(result);
        }

        results
    }
}
