use crate::category::ProductCategory;
use crate::config::types::{Config, CountryEntry, EngineConfig, FetcherConfig, PlatformTables};
use crate::ConfigError;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_engine_config(&config.engines)?;
    validate_countries(&config.countries)?;
    validate_platforms(&config.platforms)?;
    validate_brands(&config.brands)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.throttle_min_ms > config.throttle_max_ms {
        return Err(ConfigError::Validation(format!(
            "throttle_min_ms ({}) must not exceed throttle_max_ms ({})",
            config.throttle_min_ms, config.throttle_max_ms
        )));
    }

    for pattern in &config.throttled_hosts {
        validate_domain_pattern(pattern)?;
    }

    Ok(())
}

/// Validates search engine endpoints
fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    Url::parse(&config.duckduckgo_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid duckduckgo_url: {}", e)))?;
    Url::parse(&config.bing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid bing_url: {}", e)))?;

    // The template only has to parse once a domain is substituted in
    let google = config.google_url.replace("{domain}", "google.com");
    Url::parse(&google)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid google_url: {}", e)))?;

    Ok(())
}

/// Validates the supported-country table
fn validate_countries(countries: &[CountryEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in countries {
        validate_country_code(&entry.code)?;

        if !seen.insert(entry.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Country '{}' is listed more than once",
                entry.code
            )));
        }

        if entry.currency.len() != 3 || !entry.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "Currency for '{}' must be three uppercase letters, got '{}'",
                entry.code, entry.currency
            )));
        }

        if let Some(domain) = &entry.google_domain {
            validate_domain_string(domain)?;
        }
    }

    Ok(())
}

/// Validates platform tables
fn validate_platforms(platforms: &PlatformTables) -> Result<(), ConfigError> {
    for (platform, domains) in &platforms.domains {
        for (country, domain) in domains {
            validate_country_code(country)?;
            validate_domain_string(domain).map_err(|e| {
                ConfigError::InvalidPattern(format!("Platform '{}': {}", platform, e))
            })?;
        }
    }

    for (country, sites) in &platforms.country_specific {
        validate_country_code(country)?;
        for site in sites {
            validate_domain_string(site)?;
        }
    }

    Ok(())
}

/// Validates brand site lists
fn validate_brands(brands: &HashMap<String, Vec<String>>) -> Result<(), ConfigError> {
    for (category, sites) in brands {
        if ProductCategory::from_name(category).is_none() {
            return Err(ConfigError::Validation(format!(
                "Unknown product category '{}' in brands table",
                category
            )));
        }

        for site in sites {
            validate_domain_string(site)?;
        }
    }

    Ok(())
}

/// Validates a two-letter uppercase country code
fn validate_country_code(code: &str) -> Result<(), ConfigError> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "Country code must be two uppercase letters, got '{}'",
            code
        )));
    }
    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_default_config;

    #[test]
    fn test_validate_domain_pattern() {
        assert!(validate_domain_pattern("google.com").is_ok());
        assert!(validate_domain_pattern("*.google.co.in").is_ok());

        assert!(validate_domain_pattern("").is_err());
        assert!(validate_domain_pattern("*.").is_err());
        assert!(validate_domain_pattern("google").is_err());
        assert!(validate_domain_pattern(".google.com").is_err());
        assert!(validate_domain_pattern("google.com.").is_err());
        assert!(validate_domain_pattern("goo..gle.com").is_err());
    }

    #[test]
    fn test_validate_country_code() {
        assert!(validate_country_code("US").is_ok());
        assert!(validate_country_code("us").is_err());
        assert!(validate_country_code("USA").is_err());
        assert!(validate_country_code("").is_err());
    }

    #[test]
    fn test_rejects_duplicate_country() {
        let mut config = load_default_config().unwrap();
        let duplicate = config.countries[0].clone();
        config.countries.push(duplicate);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_bad_currency() {
        let mut config = load_default_config().unwrap();
        config.countries[0].currency = "usd".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_inverted_throttle_window() {
        let mut config = load_default_config().unwrap();
        config.fetcher.throttle_min_ms = 6000;
        config.fetcher.throttle_max_ms = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unknown_brand_category() {
        let mut config = load_default_config().unwrap();
        config
            .brands
            .insert("groceries".to_string(), vec!["example.com".to_string()]);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_engine_url() {
        let mut config = load_default_config().unwrap();
        config.engines.bing_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_bad_platform_domain() {
        let mut config = load_default_config().unwrap();
        config
            .platforms
            .country_specific
            .insert("US".to_string(), vec!["not a domain".to_string()]);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
