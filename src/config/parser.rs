use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reference tables compiled into the binary
pub const DEFAULT_TABLES: &str = include_str!("reference.toml");

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use price_scout::config::load_config;
///
/// let config = load_config(Path::new("tables.toml")).unwrap();
/// println!("Supported countries: {}", config.countries.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the reference tables shipped with the crate
///
/// # Example
///
/// ```
/// use price_scout::config::load_default_config;
///
/// let config = load_default_config().unwrap();
/// assert!(config.countries.iter().any(|c| c.code == "US"));
/// ```
pub fn load_default_config() -> Result<Config, ConfigError> {
    parse_config(DEFAULT_TABLES)
}

/// Computes a hex-encoded SHA-256 hash of configuration text
///
/// Logged at startup so two runs can be told apart when their tables differ.
pub fn hash_config_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Computes a SHA-256 hash of the configuration file content
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_config_content(&content))
}

/// Loads a configuration and returns both the config and its hash
///
/// With no path the embedded reference tables are used.
pub fn load_config_with_hash(path: Option<&Path>) -> Result<(Config, String), ConfigError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let config = parse_config(&content)?;
            Ok((config, hash_config_content(&content)))
        }
        None => {
            let config = load_default_config()?;
            Ok((config, hash_config_content(DEFAULT_TABLES)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const MINIMAL: &str = r#"
[fetcher]
timeout-secs = 5
max-redirects = 3
throttle-min-ms = 0
throttle-max-ms = 0

[engines]
duckduckgo-url = "https://duckduckgo.com/html/"
bing-url = "https://www.bing.com/search"
google-url = "https://{domain}/search"

[[country]]
code = "US"
currency = "USD"

[platforms]
global = ["amazon"]

[platforms.domains.amazon]
US = "amazon.com"

[brands]
electronics = ["apple.com"]
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(MINIMAL);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetcher.timeout_secs, 5);
        assert_eq!(config.fetcher.max_redirects, 3);
        assert!(config.fetcher.throttled_hosts.is_empty());
        assert_eq!(config.countries.len(), 1);
        assert_eq!(config.platforms.domains["amazon"]["US"], "amazon.com");
        assert!(config.platforms.country_specific.is_empty());
        assert_eq!(config.brands["electronics"], vec!["apple.com".to_string()]);
    }

    #[test]
    fn test_default_tables_load() {
        let config = load_default_config().unwrap();
        assert_eq!(config.fetcher.timeout_secs, 20);
        assert_eq!(config.fetcher.max_redirects, 5);
        assert!(config.countries.iter().any(|c| c.code == "IN"));
        assert!(config.platforms.global.contains(&"amazon".to_string()));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/tables.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = MINIMAL.replace("timeout-secs = 5", "timeout-secs = 0");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_hash_matches_file_hash() {
        let file = create_temp_config(MINIMAL);
        let (_, hash) = load_config_with_hash(Some(file.path())).unwrap();
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        assert_ne!(hash_config_content("content 1"), hash_config_content("content 2"));
        let (_, default_hash) = load_config_with_hash(None).unwrap();
        assert_eq!(default_hash, hash_config_content(DEFAULT_TABLES));
    }
}
