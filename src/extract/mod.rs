//! Site extraction
//!
//! This module turns fetched pages into [`PriceResult`] records:
//! - Marketplace search-results pages, via the parsers in [`platforms`]
//! - Single product-detail pages
//! - Brand homepages, scanned for product links that are then followed
//! - A price-less stub derived from a URL when its page is unreachable

mod brand;
mod detail;
pub mod html;
pub mod platforms;
mod stub;

pub use brand::scan_brand_homepage;
pub use detail::parse_product_detail;
pub use stub::extract_basic_info_from_url;

use crate::crawler::PageFetcher;
use crate::locale::LocaleResolver;
use crate::types::{CountryConfig, PriceResult};
use crate::url::convert_url_to_country_domain;
use crate::FetchError;
use futures::future::join_all;
use platforms::Platform;
use std::sync::Arc;

/// Fetches and parses marketplace, product and brand pages
#[derive(Debug, Clone)]
pub struct SiteExtractor {
    fetcher: Arc<PageFetcher>,
    locale: Arc<LocaleResolver>,
}

impl SiteExtractor {
    pub fn new(fetcher: Arc<PageFetcher>, locale: Arc<LocaleResolver>) -> Self {
        Self { fetcher, locale }
    }

    /// Searches one website for the query
    ///
    /// Marketplaces with a search page are queried directly and their results
    /// page parsed. Any other website is treated as a brand site: its homepage is
    /// scanned for product links, each of which is followed and parsed as a
    /// product page. Failures yield an empty list.
    pub async fn search_on_website(
        &self,
        query: &str,
        website: &str,
        country: &CountryConfig,
    ) -> Vec<PriceResult> {
        match platforms::search_url(website, query) {
            Some(url) => {
                let Some(html) = self.fetcher.fetch(&url).await else {
                    return Vec::new();
                };
                let platform = Platform::for_website(website);
                let results = platform.parser().parse(&html, website, country);
                tracing::info!(
                    "{} parser found {} results on {}",
                    platform,
                    results.len(),
                    website
                );
                results
            }
            None => self.search_brand_website(query, website, country).await,
        }
    }

    async fn search_brand_website(
        &self,
        query: &str,
        website: &str,
        country: &CountryConfig,
    ) -> Vec<PriceResult> {
        tracing::info!("Searching for \"{}\" on brand website {}", query, website);

        let Some(html) = self.fetcher.fetch(&html::site_origin(website)).await else {
            return Vec::new();
        };
        let product_urls = scan_brand_homepage(&html, website, query);

        let tasks = product_urls.iter().map(|url| {
            let url = convert_url_to_country_domain(url, &country.code, &self.locale);
            async move { self.product_details(&url, Some(country)).await }
        });

        let results: Vec<PriceResult> = join_all(tasks)
            .await
            .into_iter()
            .filter_map(|outcome| outcome.ok().flatten())
            .collect();

        tracing::info!(
            "Successfully extracted {} products from {}",
            results.len(),
            website
        );
        results
    }

    /// Fetches a product page and parses it
    ///
    /// `Ok(None)` means the page was reachable but did not look like a product.
    /// Fetch failures are returned so callers can tell network trouble apart.
    pub async fn product_details(
        &self,
        url: &str,
        country: Option<&CountryConfig>,
    ) -> Result<Option<PriceResult>, FetchError> {
        let html = self.fetcher.fetch_page(url).await?;
        Ok(parse_product_detail(&html, url, country, &self.locale))
    }
}
