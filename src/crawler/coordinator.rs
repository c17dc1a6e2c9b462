//! Price comparison coordinator - request orchestration logic
//!
//! This module runs one price-comparison request end to end:
//! - Validating the query and resolving the country
//! - Running the search-engine, marketplace and brand-site paths concurrently
//! - Falling back to URL analysis when a product page is unreachable
//! - Merging and ranking the results

use crate::category::detect_product_category;
use crate::config::Config;
use crate::crawler::PageFetcher;
use crate::extract::{extract_basic_info_from_url, SiteExtractor};
use crate::locale::LocaleResolver;
use crate::rank::rank;
use crate::search::SearchDiscovery;
use crate::types::{CountryConfig, PriceResult, SearchConfig};
use crate::url::{convert_url_to_country_domain, is_excluded_host};
use crate::{PriceError, Result};
use futures::future::join_all;
use std::sync::Arc;

/// Federated price comparator
///
/// Built once from configuration and shared by reference; every request only
/// reads from it.
#[derive(Debug, Clone)]
pub struct PriceComparator {
    locale: Arc<LocaleResolver>,
    discovery: SearchDiscovery,
    extractor: SiteExtractor,
}

impl PriceComparator {
    /// Creates a new comparator
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PriceComparator)` - Successfully created comparator
    /// * `Err(PriceError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(PageFetcher::new(&config.fetcher)?);
        let locale = Arc::new(LocaleResolver::new(&config));

        Ok(Self {
            discovery: SearchDiscovery::new(
                Arc::clone(&fetcher),
                Arc::clone(&locale),
                config.engines,
            ),
            extractor: SiteExtractor::new(fetcher, Arc::clone(&locale)),
            locale,
        })
    }

    pub fn locale(&self) -> &LocaleResolver {
        &self.locale
    }

    /// Searches every source for a product and ranks the results
    ///
    /// This method:
    /// 1. Rejects an empty query or unsupported country before any request
    /// 2. Runs the search-engine, marketplace and brand paths concurrently
    /// 3. Concatenates their results in that order
    /// 4. Ranks them by the requested order
    ///
    /// Remote failures never surface here; they only shrink the result list.
    pub async fn search_product(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<PriceResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PriceError::EmptyQuery);
        }

        let mut country = self.locale.country_config(&config.country).ok_or_else(|| {
            PriceError::UnsupportedCountry {
                country: config.country.clone(),
            }
        })?;
        if let Some(currency) = &config.currency {
            country.currency = currency.clone();
        }

        tracing::info!("Searching for \"{}\" in {}", query, country.code);

        let (discovered, marketplace, brand) = tokio::join!(
            self.search_engine_results(query, &country, config.language.as_deref()),
            self.marketplace_results(query, &country),
            self.brand_results(query, &country),
        );

        tracing::info!(
            "Collected {} search-engine, {} marketplace and {} brand results",
            discovered.len(),
            marketplace.len(),
            brand.len()
        );

        let mut results = discovered;
        results.extend(marketplace);
        results.extend(brand);

        Ok(rank(results, config.sort_by))
    }

    /// Like [`search_product`](Self::search_product), truncated to `max_results`
    pub async fn compare(&self, query: &str, config: &SearchConfig) -> Result<Vec<PriceResult>> {
        let mut results = self.search_product(query, config).await?;
        if let Some(max_results) = config.max_results {
            results.truncate(max_results);
        }
        Ok(results)
    }

    /// Search engines, then one product-page extraction per discovered URL
    async fn search_engine_results(
        &self,
        query: &str,
        country: &CountryConfig,
        language: Option<&str>,
    ) -> Vec<PriceResult> {
        let urls = self.discovery.discover(query, &country.code, language).await;

        let candidates: Vec<String> = urls
            .into_iter()
            .filter(|url| {
                let excluded = is_excluded_host(url);
                if excluded {
                    tracing::debug!("Skipping excluded host: {}", url);
                }
                !excluded
            })
            .collect();
        tracing::info!("Extracted {} product URLs from search results", candidates.len());

        let tasks = candidates.iter().map(|url| async move {
            let local_url = convert_url_to_country_domain(url, &country.code, &self.locale);
            match self.extractor.product_details(&local_url, Some(country)).await {
                Ok(result) => result,
                Err(e) if e.is_network_failure() => {
                    tracing::info!("{}, attempting URL analysis for {}", e, url);
                    extract_basic_info_from_url(url, country)
                }
                Err(e) => {
                    tracing::warn!("Failed to get product details: {}", e);
                    None
                }
            }
        });

        join_all(tasks).await.into_iter().flatten().collect()
    }

    /// Direct search on the country's e-commerce platforms
    async fn marketplace_results(&self, query: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let websites = self.locale.ecommerce_websites(&country.code);
        tracing::debug!("Searching {} e-commerce platforms", websites.len());

        let tasks = websites
            .iter()
            .map(|website| self.extractor.search_on_website(query, website, country));

        join_all(tasks).await.into_iter().flatten().collect()
    }

    /// Official brand sites for the query's product category
    async fn brand_results(&self, query: &str, country: &CountryConfig) -> Vec<PriceResult> {
        let Some(category) = detect_product_category(query) else {
            tracing::debug!("No product category detected for \"{}\"", query);
            return Vec::new();
        };

        let websites = self.locale.brand_websites(category);
        tracing::debug!(
            "Searching {} brand websites for category {}",
            websites.len(),
            category.name()
        );

        let tasks = websites
            .iter()
            .map(|website| self.extractor.search_on_website(query, website, country));

        join_all(tasks).await.into_iter().flatten().collect()
    }
}
