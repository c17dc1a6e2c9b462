use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure for Price-Scout
///
/// Besides the fetcher and engine settings this carries the static reference
/// tables (countries, platform domains, brand sites). They are read once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub engines: EngineConfig,
    #[serde(default, rename = "country")]
    pub countries: Vec<CountryEntry>,
    #[serde(default)]
    pub platforms: PlatformTables,
    /// Product category name -> brand homepages
    #[serde(default)]
    pub brands: HashMap<String, Vec<String>>,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Lower bound of the randomized delay before a throttled request (milliseconds)
    #[serde(rename = "throttle-min-ms")]
    pub throttle_min_ms: u64,

    /// Upper bound of the randomized delay before a throttled request (milliseconds)
    #[serde(rename = "throttle-max-ms")]
    pub throttle_max_ms: u64,

    /// Host patterns (e.g. "*.google.com") that rate-limit aggressively
    #[serde(default, rename = "throttled-hosts")]
    pub throttled_hosts: Vec<String>,
}

/// Search engine endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(rename = "duckduckgo-url")]
    pub duckduckgo_url: String,

    #[serde(rename = "bing-url")]
    pub bing_url: String,

    /// Template with a `{domain}` placeholder for the country's Google domain
    #[serde(rename = "google-url")]
    pub google_url: String,
}

/// One supported country
#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    /// Uppercase country code, e.g. "US" or "UK"
    pub code: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Currency code, e.g. "USD"
    pub currency: String,

    #[serde(rename = "duckduckgo-locale")]
    pub duckduckgo_locale: Option<String>,

    #[serde(rename = "bing-locale")]
    pub bing_locale: Option<String>,

    #[serde(rename = "google-domain")]
    pub google_domain: Option<String>,
}

/// E-commerce platform reference tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformTables {
    /// Platforms present in many markets under country-specific domains
    #[serde(default)]
    pub global: Vec<String>,

    /// Platform -> country code -> domain
    #[serde(default)]
    pub domains: HashMap<String, HashMap<String, String>>,

    /// Country code -> platforms that only exist in that market
    #[serde(default, rename = "country-specific")]
    pub country_specific: HashMap<String, Vec<String>>,
}
