//! HTTP fetcher implementation
//!
//! This module handles every outbound GET, including:
//! - Building the shared HTTP client with timeout and redirect limits
//! - Browser-like request headers with a rotating user agent
//! - Extra headers and a randomized delay for throttled hosts
//! - Error classification for the aggregation step

use crate::config::FetcherConfig;
use crate::url::{extract_domain, matches_wildcard};
use crate::FetchError;
use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, DNT, REFERER,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Desktop Chrome user agents, one picked per request
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

const CLIENT_DATA: &str = "CIa2yQEIo7bJAQipncoBCKijygEIkqHLAQiFoM0BCJyrzQEI8KvNAQj1q80BCIqtzQEIj67NAQiZr80BCKmvzQEI2q/NAQjcr80BCJ2wzQEIq7HNAQ==";

/// Upper bound on the TCP/TLS handshake, independent of the request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared GET client used by every discovery path
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    throttled_hosts: Vec<String>,
    throttle_min_ms: u64,
    throttle_max_ms: u64,
}

impl PageFetcher {
    /// Builds a fetcher from configuration
    ///
    /// # Example
    ///
    /// ```
    /// use price_scout::config::load_default_config;
    /// use price_scout::crawler::PageFetcher;
    ///
    /// let config = load_default_config().unwrap();
    /// let fetcher = PageFetcher::new(&config.fetcher).unwrap();
    /// assert!(fetcher.is_throttled("https://www.google.co.in/search?q=x"));
    /// ```
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(config.timeout_secs),
            ))
            .redirect(Policy::limited(config.max_redirects))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            throttled_hosts: config.throttled_hosts.clone(),
            throttle_min_ms: config.throttle_min_ms,
            throttle_max_ms: config.throttle_max_ms,
        })
    }

    /// Fetches a page body, logging and swallowing every failure
    ///
    /// Any status below 500 counts as success: block and error pages still have a
    /// body worth sniffing.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_page(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Request failed: {}", e);
                None
            }
        }
    }

    /// Fetches a page body, returning the classified failure
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let throttled = self.is_throttled(url);
        let headers = build_headers(url, throttled);

        if throttled {
            let delay = self.throttle_delay();
            if !delay.is_zero() {
                tracing::debug!("Adding {}ms delay for {}", delay.as_millis(), url);
                tokio::time::sleep(delay).await;
            }
        }

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!("Fetched {} ({})", url, status.as_u16());
        response.text().await.map_err(|e| classify_error(url, e))
    }

    /// Returns true when the URL's host matches a throttled-host pattern
    pub fn is_throttled(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url).ok().as_ref().and_then(extract_domain) else {
            return false;
        };

        self.throttled_hosts
            .iter()
            .any(|pattern| matches_wildcard(pattern, &host))
    }

    fn throttle_delay(&self) -> Duration {
        if self.throttle_max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::rng().random_range(self.throttle_min_ms..=self.throttle_max_ms);
        Duration::from_millis(ms)
    }
}

fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())]
}

/// Builds the per-request header set
fn build_headers(url: &str, throttled: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(random_user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(DNT, HeaderValue::from_static("1"));

    if throttled {
        // Look like a follow-up navigation from the same site
        if let Some(referer) = origin_of(url).and_then(|o| HeaderValue::from_str(&o).ok()) {
            headers.insert(REFERER, referer);
        }
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
        headers.insert("x-client-data", HeaderValue::from_static(CLIENT_DATA));
    }

    headers
}

fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    Some(format!("{}/", parsed.origin().ascii_serialization()))
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}
