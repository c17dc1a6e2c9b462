//! Search-engine discovery
//!
//! Turns a product query into candidate product-page URLs by scraping the HTML
//! results pages of DuckDuckGo, Bing and Google.

mod engines;

pub use engines::{is_blocked_page, SearchEngine};

use crate::config::EngineConfig;
use crate::crawler::PageFetcher;
use crate::locale::LocaleResolver;
use std::collections::HashSet;
use std::sync::Arc;

/// Candidate URL discovery across the three engines
#[derive(Debug, Clone)]
pub struct SearchDiscovery {
    fetcher: Arc<PageFetcher>,
    locale: Arc<LocaleResolver>,
    engines: EngineConfig,
}

impl SearchDiscovery {
    pub fn new(fetcher: Arc<PageFetcher>, locale: Arc<LocaleResolver>, engines: EngineConfig) -> Self {
        Self {
            fetcher,
            locale,
            engines,
        }
    }

    /// Discovers candidate product URLs for a query
    ///
    /// Google yielding nothing is read as Google having blocked us, in which case
    /// DuckDuckGo and Bing are asked again with reworded queries. The returned
    /// list is deduplicated, first occurrence wins.
    pub async fn discover(&self, query: &str, country: &str, language: Option<&str>) -> Vec<String> {
        let (duckduckgo, bing, google) = tokio::join!(
            self.search(SearchEngine::DuckDuckGo, query, country, language),
            self.search(SearchEngine::Bing, query, country, language),
            self.search(SearchEngine::Google, query, country, language),
        );

        let mut urls = duckduckgo;
        urls.extend(bing);

        if google.is_empty() {
            tracing::info!("Google returned nothing, retrying other engines with broader queries");

            let comparison = format!("{} price comparison", query);
            let best_price = format!("{} best price", query);
            let (more_duckduckgo, more_bing) = tokio::join!(
                self.search(SearchEngine::DuckDuckGo, &comparison, country, language),
                self.search(SearchEngine::Bing, &best_price, country, language),
            );
            urls.extend(more_duckduckgo);
            urls.extend(more_bing);
        } else {
            urls.extend(google);
        }

        let mut seen = HashSet::new();
        urls.retain(|url| seen.insert(url.clone()));

        if urls.is_empty() {
            tracing::warn!("Search engines found no product URLs for country {}", country);
        } else {
            tracing::info!(
                "Search engines found {} unique URLs for country {}",
                urls.len(),
                country
            );
        }

        urls
    }

    /// Queries a single engine, returning zero URLs on any failure
    pub async fn search(
        &self,
        engine: SearchEngine,
        query: &str,
        country: &str,
        language: Option<&str>,
    ) -> Vec<String> {
        let url = engine.search_url(&self.engines, &self.locale, query, country, language);
        tracing::debug!("Searching {} for: {}", engine, query);

        let Some(html) = self.fetcher.fetch(&url).await else {
            return Vec::new();
        };

        if engine == SearchEngine::Google && is_blocked_page(&html) {
            tracing::warn!("Google blocked the search request for: {}", query);
            return Vec::new();
        }

        let urls = engine.extract_candidates(&html);
        tracing::info!("{} found {} product URLs", engine, urls.len());
        urls
    }
}
