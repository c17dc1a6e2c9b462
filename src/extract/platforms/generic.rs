use super::{rating_note, SearchResultsParser};
use crate::extract::html::{
    all_text, first_attr, first_number, first_text, resolve_link, selector, site_base,
};
use crate::types::{CountryConfig, PriceResult};
use scraper::Html;

/// Candidate elements read from a page without a dedicated parser
const MAX_GENERIC_CARDS: usize = 5;

const CARD_SELECTOR: &str = r#"a[href*="/product"], a[href*="/item"], .product, .item"#;
const TITLE_SELECTOR: &str = "h1, h2, h3, .title, .name";
const PRICE_SELECTOR: &str = r#".price, .cost, [class*="price"]"#;
const RATING_SELECTOR: &str = ".rating, .stars";

/// Best-effort parser for storefronts without dedicated markup knowledge
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericParser;

impl SearchResultsParser for GenericParser {
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let (Some(cards), Some(base)) = (selector(CARD_SELECTOR), site_base(website)) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for card in document.select(&cards).take(MAX_GENERIC_CARDS) {
            let title = first_text(card, TITLE_SELECTOR);
            let price = first_text(card, PRICE_SELECTOR);
            let href = card
                .value()
                .attr("href")
                .map(str::to_string)
                .or_else(|| first_attr(card, "a", "href"));
            let link = href.and_then(|href| resolve_link(&href, &base));

            let Some(link) = link else { continue };
            if title.is_empty() || price.is_empty() {
                continue;
            }

            let rating = first_number(&all_text(card, RATING_SELECTOR));

            let mut result = PriceResult::new(link, price, title, website, country)
                .with_annotations([
                    rating_note(rating),
                    format!("Platform: {}", website),
                    format!("Country: {}", country.code),
                    format!("Currency: {}", country.currency),
                    format!("Website: {}", website),
                ]);
            result.rating = rating;
            result.image_url = first_attr(card, "img", "src");

            results.push(result);
        }

        results
    }
}
