use super::{rating_note, SearchResultsParser, MAX_CARDS};
use crate::extract::html::{all_text, first_attr, first_number, non_empty, selector};
use crate::types::{CountryConfig, PriceResult};
use crate::url::strip_tracking;
use scraper::Html;

/// Prices eBay renders on layout placeholder tiles
const PLACEHOLDER_PRICES: &[&str] = &["$20.00", "$0.00"];

/// Titles of promotional tiles mixed in with real listings
const LAYOUT_TITLES: &[&str] = &["shop on ebay", "see all"];

/// eBay search results (`.s-item` listings)
#[derive(Debug, Clone, Copy, Default)]
pub struct EbayParser;

impl SearchResultsParser for EbayParser {
    fn parse(&self, html: &str, website: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let Some(items) = selector(".s-item") else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for item in document.select(&items).take(MAX_CARDS) {
            let title = all_text(item, ".s-item__title");
            let price = all_text(item, ".s-item__price");
            let Some(link) = first_attr(item, ".s-item__link", "href") else {
                continue;
            };

            let lower_title = title.to_lowercase();
            if title.is_empty()
                || price.is_empty()
                || LAYOUT_TITLES.iter().any(|t| lower_title.contains(t))
                || PLACEHOLDER_PRICES.contains(&price.as_str())
            {
                continue;
            }

            let rating = first_number(&all_text(item, ".x-star-rating__text"));
            let shipping = non_empty(all_text(item, ".s-item__shipping"));

            let mut result = PriceResult::new(strip_tracking(&link), price, title, website, country)
                .with_annotations([
                    rating_note(rating),
                    "Platform: eBay".to_string(),
                    format!("Country: {}", country.code),
                    format!("Currency: {}", country.currency),
                    format!("Shipping: {}", shipping.as_deref().unwrap_or("Free")),
                ]);
            result.rating = rating;
            result.image_url = first_attr(item, ".s-item__image-img", "src");
            result.shipping = shipping;

            results.push(result);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uk() -> CountryConfig {
        CountryConfig {
            code: "UK".to_string(),
            currency: "GBP".to_string(),
        }
    }

    fn item(title: &str, price: &str, link: Option<&str>) -> String {
        let anchor = link
            .map(|href| format!(r#"<a class="s-item__link" href="{}"></a>"#, href))
            .unwrap_or_default();
        format!(
            r#"<li class="s-item">{}<div class="s-item__title">{}</div><span class="s-item__price">{}</span></li>"#,
            anchor, title, price
        )
    }

    #[test]
    fn test_parses_listing_and_strips_tracking() {
        let page = format!(
            r#"<ul>{}</ul>"#,
            item(
                "Samsung Galaxy S24 128GB",
                "£529.00",
                Some("https://www.ebay.co.uk/itm/1357?hash=item1f&amdata=enc")
            )
        );
        let results = EbayParser.parse(&page, "ebay.co.uk", &uk());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "https://www.ebay.co.uk/itm/1357");
        assert_eq!(results[0].annotations[4], "Shipping: Free");
        assert_eq!(results[0].shipping, None);
    }

    #[test]
    fn test_rejects_placeholders_and_layout_tiles() {
        let page = [
            item("Shop on eBay", "£10.00", Some("https://ebay.co.uk/itm/1")),
            item("Galaxy", "$20.00", Some("https://ebay.co.uk/itm/2")),
            item("Galaxy", "$0.00", Some("https://ebay.co.uk/itm/3")),
            item("See all results", "£5.00", Some("https://ebay.co.uk/itm/4")),
            item("Galaxy", "£99.00", None),
            item("Galaxy S24", "£499.00", Some("https://ebay.co.uk/itm/5")),
        ]
        .concat();

        let results = EbayParser.parse(&page, "ebay.co.uk", &uk());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "https://ebay.co.uk/itm/5");
    }

    #[test]
    fn test_rating_and_shipping() {
        let page = r#"
            <li class="s-item">
                <a class="s-item__link" href="https://ebay.co.uk/itm/9"></a>
                <div class="s-item__title">Galaxy</div>
                <span class="s-item__price">£450.00</span>
                <span class="x-star-rating__text">4.5 out of 5 stars</span>
                <span class="s-item__shipping">+£3.99 postage</span>
            </li>
        "#;
        let results = EbayParser.parse(page, "ebay.co.uk", &uk());
        assert_eq!(results[0].rating, Some(4.5));
        assert_eq!(results[0].shipping.as_deref(), Some("+£3.99 postage"));
        assert_eq!(results[0].annotations[4], "Shipping: +£3.99 postage");
    }
}
