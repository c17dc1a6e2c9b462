//! Request and result types shared across the pipeline

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Price text carried by results that were derived from a URL alone
pub const PRICE_UNAVAILABLE: &str = "Price not available";

/// Maximum number of display annotations a result carries
pub const MAX_ANNOTATIONS: usize = 5;

/// One product/price observation from one source
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub link: String,
    /// Raw display text as scraped, e.g. "$1,299.99"
    pub price: String,
    pub currency: String,
    pub product_name: String,
    /// Hostname the result was scraped from
    pub website: String,
    pub country: String,
    pub availability: bool,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub shipping: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub image_url: Option<String>,
    /// Free-form display attributes, at most [`MAX_ANNOTATIONS`]
    pub annotations: Vec<String>,
}

impl PriceResult {
    /// Creates a result with the mandatory fields set and everything else empty
    pub fn new(
        link: impl Into<String>,
        price: impl Into<String>,
        product_name: impl Into<String>,
        website: impl Into<String>,
        country: &CountryConfig,
    ) -> Self {
        Self {
            link: link.into(),
            price: price.into(),
            currency: country.currency.clone(),
            product_name: product_name.into(),
            website: website.into(),
            country: country.code.clone(),
            availability: true,
            rating: None,
            review_count: None,
            shipping: None,
            original_price: None,
            discount: None,
            image_url: None,
            annotations: Vec::new(),
        }
    }

    /// Replaces the annotation bag, keeping at most [`MAX_ANNOTATIONS`] entries
    pub fn with_annotations<I, S>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations = annotations
            .into_iter()
            .take(MAX_ANNOTATIONS)
            .map(Into::into)
            .collect();
        self
    }
}

impl Serialize for PriceResult {
    // Annotations go out as parameter1..parameter5 to keep the wire shape flat
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("link", &self.link)?;
        map.serialize_entry("price", &self.price)?;
        map.serialize_entry("currency", &self.currency)?;
        map.serialize_entry("productName", &self.product_name)?;
        map.serialize_entry("website", &self.website)?;
        map.serialize_entry("country", &self.country)?;
        map.serialize_entry("availability", &self.availability)?;

        let optional = [
            ("shipping", &self.shipping),
            ("originalPrice", &self.original_price),
            ("discount", &self.discount),
            ("imageUrl", &self.image_url),
        ];
        if let Some(rating) = self.rating {
            map.serialize_entry("rating", &rating)?;
        }
        if let Some(count) = self.review_count {
            map.serialize_entry("reviewCount", &count)?;
        }
        for (key, value) in optional {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        for (index, annotation) in self.annotations.iter().enumerate() {
            map.serialize_entry(&format!("parameter{}", index + 1), annotation)?;
        }
        map.end()
    }
}

/// Result ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Price,
    Rating,
    Relevance,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "relevance" => Ok(Self::Relevance),
            other => Err(format!(
                "unknown sort order '{}', expected price, rating or relevance",
                other
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Relevance => "relevance",
        };
        f.write_str(name)
    }
}

/// Per-request search parameters
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Uppercased ISO-style country code
    pub country: String,
    /// Overrides the search-engine interface language
    pub language: Option<String>,
    /// Overrides the currency reported on results
    pub currency: Option<String>,
    pub max_results: Option<usize>,
    pub sort_by: SortBy,
}

impl SearchConfig {
    /// Creates a config for the given country, sorted by price with no result cap
    pub fn new(country: &str) -> Self {
        Self {
            country: country.trim().to_uppercase(),
            language: None,
            currency: None,
            max_results: None,
            sort_by: SortBy::default(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// Country code and the currency prices are reported in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryConfig {
    pub code: String,
    pub currency: String,
}
