//! Result ordering

use crate::extract::html::leading_float;
use crate::types::{PriceResult, SortBy};
use std::cmp::Ordering;

/// Orders results for presentation
///
/// All orders are stable. By price, results whose price text has no number
/// (such as URL-derived stubs) go last.
pub fn rank(mut results: Vec<PriceResult>, sort_by: SortBy) -> Vec<PriceResult> {
    match sort_by {
        SortBy::Price => {
            results.sort_by(|a, b| compare_prices(price_value(&a.price), price_value(&b.price)))
        }
        SortBy::Rating => results.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
        SortBy::Relevance => {}
    }
    results
}

/// Numeric value of a price text, keeping only digits and dots
///
/// "$1,299.99" gives 1299.99.
pub fn price_value(price: &str) -> Option<f64> {
    let cleaned: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&cleaned)
}

fn compare_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CountryConfig, PRICE_UNAVAILABLE};

    fn result(name: &str, price: &str, rating: Option<f64>) -> PriceResult {
        let us = CountryConfig {
            code: "US".to_string(),
            currency: "USD".to_string(),
        };
        let mut result = PriceResult::new("https://a.com/p", price, name, "a.com", &us);
        result.rating = rating;
        result
    }

    fn names(results: &[PriceResult]) -> Vec<&str> {
        results.iter().map(|r| r.product_name.as_str()).collect()
    }

    #[test]
    fn test_price_value() {
        assert_eq!(price_value("$1,299.99"), Some(1299.99));
        assert_eq!(price_value("₹74,999"), Some(74999.0));
        assert_eq!(price_value("US $12.50"), Some(12.5));
        assert_eq!(price_value(PRICE_UNAVAILABLE), None);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let ranked = rank(
            vec![
                result("thirty", "$30.00", None),
                result("cheap", "$9.99", None),
                result("hundred", "$100", None),
            ],
            SortBy::Price,
        );
        assert_eq!(names(&ranked), vec!["cheap", "thirty", "hundred"]);
    }

    #[test]
    fn test_unparseable_prices_sort_last_in_order() {
        let ranked = rank(
            vec![
                result("stub-a", PRICE_UNAVAILABLE, None),
                result("priced", "$5", None),
                result("stub-b", "call for price", None),
            ],
            SortBy::Price,
        );
        assert_eq!(names(&ranked), vec!["priced", "stub-a", "stub-b"]);
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let ranked = rank(
            vec![
                result("unrated", "$1", None),
                result("three", "$1", Some(3.0)),
                result("best", "$1", Some(4.5)),
            ],
            SortBy::Rating,
        );
        assert_eq!(names(&ranked), vec!["best", "three", "unrated"]);
    }

    #[test]
    fn test_relevance_keeps_order() {
        let input = vec![
            result("b", "$2", None),
            result("a", "$1", None),
            result("c", "$3", None),
        ];
        let ranked = rank(input, SortBy::Relevance);
        assert_eq!(names(&ranked), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equal_prices_are_stable() {
        let ranked = rank(
            vec![result("first", "$10", None), result("second", "$10.00", None)],
            SortBy::Price,
        );
        assert_eq!(names(&ranked), vec!["first", "second"]);
    }
}
