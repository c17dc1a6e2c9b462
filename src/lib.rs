//! Price-Scout: a federated product price comparator
//!
//! This crate answers "where can I buy X, at what price, in country C" by combining
//! general web search engines, direct e-commerce platform search and brand-site scans,
//! scraping static HTML into [`PriceResult`] records and ranking them.

pub mod category;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod locale;
pub mod rank;
pub mod search;
pub mod types;
pub mod url;

use thiserror::Error;

/// Main error type for Price-Scout operations
///
/// These are the only failures a caller of [`crawler::PriceComparator`] ever sees.
/// Everything that goes wrong while talking to remote sites degrades to fewer results.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Country {country} is not supported")]
    UnsupportedCountry { country: String },

    #[error("Product name is required")]
    EmptyQuery,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Per-URL fetch failures
///
/// These never leave the crate's request pipeline; they exist so the aggregation
/// step can tell a network outage apart from a page that simply had no product.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Server error {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Returns true for timeouts, refused connections and 503 responses
    pub fn is_network_failure(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connect { .. } => true,
            Self::Status { status, .. } => *status == 503,
            Self::Http { .. } => false,
        }
    }
}

/// Result type alias for Price-Scout operations
pub type Result<T> = std::result::Result<T, PriceError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::PriceComparator;
pub use locale::LocaleResolver;
pub use types::{CountryConfig, PriceResult, SearchConfig, SortBy, PRICE_UNAVAILABLE};
