//! Locale and reference-table lookups
//!
//! [`LocaleResolver`] answers every "what does country C use for X" question:
//! search-engine locales, Google domains, currencies, platform domains, the
//! platform list for a market and the brand list for a product category.
//!
//! All lookups except [`LocaleResolver::country_config`] fall back to US defaults
//! instead of failing.

use crate::category::ProductCategory;
use crate::config::{Config, CountryEntry};
use crate::types::CountryConfig;
use std::collections::{HashMap, HashSet};

const DEFAULT_DUCKDUCKGO_LOCALE: &str = "us-en";
const DEFAULT_BING_LOCALE: &str = "en-US";
const DEFAULT_GOOGLE_DOMAIN: &str = "google.com";
const DEFAULT_CURRENCY: &str = "USD";

/// Maximum number of e-commerce platforms searched per request
pub const MAX_ECOMMERCE_WEBSITES: usize = 15;

/// Maximum number of brand sites scanned per request
pub const MAX_BRAND_WEBSITES: usize = 10;

/// Read-only view over the configured reference tables
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    countries: HashMap<String, CountryEntry>,
    /// Configured order, for listings
    country_order: Vec<String>,
    global_platforms: Vec<String>,
    platform_domains: HashMap<String, HashMap<String, String>>,
    country_specific: HashMap<String, Vec<String>>,
    brands: HashMap<String, Vec<String>>,
}

impl LocaleResolver {
    /// Builds a resolver from validated configuration
    pub fn new(config: &Config) -> Self {
        let country_order = config.countries.iter().map(|c| c.code.clone()).collect();
        let countries = config
            .countries
            .iter()
            .map(|c| (c.code.clone(), c.clone()))
            .collect();

        Self {
            countries,
            country_order,
            global_platforms: config.platforms.global.clone(),
            platform_domains: config.platforms.domains.clone(),
            country_specific: config.platforms.country_specific.clone(),
            brands: config.brands.clone(),
        }
    }

    fn entry(&self, country: &str) -> Option<&CountryEntry> {
        self.countries.get(&country.to_uppercase())
    }

    pub fn duckduckgo_locale(&self, country: &str) -> &str {
        self.entry(country)
            .and_then(|e| e.duckduckgo_locale.as_deref())
            .unwrap_or(DEFAULT_DUCKDUCKGO_LOCALE)
    }

    pub fn bing_locale(&self, country: &str) -> &str {
        self.entry(country)
            .and_then(|e| e.bing_locale.as_deref())
            .unwrap_or(DEFAULT_BING_LOCALE)
    }

    pub fn google_domain(&self, country: &str) -> &str {
        self.entry(country)
            .and_then(|e| e.google_domain.as_deref())
            .unwrap_or(DEFAULT_GOOGLE_DOMAIN)
    }

    /// Currency for a country, USD when the country is unknown
    pub fn currency_for(&self, country: &str) -> &str {
        self.entry(country)
            .map(|e| e.currency.as_str())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// Returns the country/currency pair, or `None` for an unsupported country
    pub fn country_config(&self, country: &str) -> Option<CountryConfig> {
        self.entry(country).map(|e| CountryConfig {
            code: e.code.clone(),
            currency: e.currency.clone(),
        })
    }

    /// Returns the platform's domain in the given market, if it operates there
    pub fn country_domain(&self, platform: &str, country: &str) -> Option<&str> {
        self.platform_domains
            .get(platform)?
            .get(&country.to_uppercase())
            .map(String::as_str)
    }

    pub fn country_specific_platforms(&self, country: &str) -> &[String] {
        self.country_specific
            .get(&country.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Platforms searched directly for a country
    ///
    /// Country-specific platforms come first, followed by each global platform
    /// that has a domain in this market.
    pub fn ecommerce_websites(&self, country: &str) -> Vec<String> {
        let local = self.country_specific_platforms(country).iter().cloned();
        let global = self
            .global_platforms
            .iter()
            .filter_map(|platform| self.country_domain(platform, country))
            .map(str::to_string);

        dedup_capped(local.chain(global), MAX_ECOMMERCE_WEBSITES)
    }

    /// Official brand sites for a category
    pub fn brand_websites(&self, category: ProductCategory) -> Vec<String> {
        let sites = self
            .brands
            .get(category.name())
            .map(|sites| sites.iter().cloned())
            .into_iter()
            .flatten();

        dedup_capped(sites, MAX_BRAND_WEBSITES)
    }

    /// Configured countries in table order
    pub fn supported_countries(&self) -> Vec<&CountryEntry> {
        self.country_order
            .iter()
            .filter_map(|code| self.countries.get(code))
            .collect()
    }
}

/// Infers a country code from a URL's domain suffix, US when nothing matches
pub fn detect_country_from_url(url: &str) -> &'static str {
    let lower = url.to_lowercase();

    if lower.contains(".in/") || lower.contains(".co.in") {
        "IN"
    } else if lower.contains(".uk/") || lower.contains(".co.uk") {
        "UK"
    } else if lower.contains(".ca/") {
        "CA"
    } else if lower.contains(".de/") {
        "DE"
    } else if lower.contains(".fr/") {
        "FR"
    } else if lower.contains(".au/") || lower.contains(".com.au") {
        "AU"
    } else {
        "US"
    }
}

fn dedup_capped<I>(items: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}
