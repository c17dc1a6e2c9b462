//! Configuration module for Price-Scout
//!
//! This module handles loading, parsing, and validating the TOML reference tables:
//! fetcher settings, search engine endpoints, supported countries, e-commerce
//! platform domains and brand sites.
//!
//! # Example
//!
//! ```no_run
//! use price_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tables.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CountryEntry, EngineConfig, FetcherConfig, PlatformTables,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_config_content, load_config, load_config_with_hash,
    load_default_config, parse_config, DEFAULT_TABLES,
};
