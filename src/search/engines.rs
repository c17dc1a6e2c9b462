//! Per-engine URL templates, result selectors and candidate filtering

use crate::config::EngineConfig;
use crate::locale::LocaleResolver;
use crate::url::{decode_redirect, encode_component, is_ad_link, is_product_url, is_search_result_page};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fmt;

/// Suffix appended to every engine query
const QUERY_SUFFIX: &str = "buy online price";

/// Phrases that only appear on Google's interstitial and captcha pages
const BLOCK_PAGE_PHRASES: &[&str] = &[
    "trouble accessing Google Search",
    "unusual traffic",
    "robot",
    "captcha",
    "Our systems have detected unusual traffic",
    "To continue, please type the characters below",
    "Please complete the security check",
    "Sorry, we can't verify that you're not a robot",
    "Please try your request again",
    "We're sorry...",
    "Access denied",
];

/// A general web search engine, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    DuckDuckGo,
    Bing,
    Google,
}

impl SearchEngine {
    /// Selector for result anchors on the engine's HTML results page
    fn result_selector(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => ".result__a, .result__url, .result__title a, .result__snippet a",
            Self::Bing => "h2 a, .b_algo a, .b_title a, .b_caption a",
            Self::Google => "h3 a, .g a, [data-ved] a, .yuRUbf a, .rc a, .LC20lb a",
        }
    }

    /// Maximum candidates kept from one results page
    pub fn max_candidates(&self) -> usize {
        match self {
            Self::DuckDuckGo | Self::Bing => 8,
            Self::Google => 5,
        }
    }

    /// Builds the results-page URL for a query
    ///
    /// `language` replaces Bing's interface locale when given. The other engines
    /// take their locale from the country alone.
    pub fn search_url(
        &self,
        endpoints: &EngineConfig,
        locale: &LocaleResolver,
        query: &str,
        country: &str,
        language: Option<&str>,
    ) -> String {
        let q = encode_component(&format!("{} {}", query, QUERY_SUFFIX));

        match self {
            Self::DuckDuckGo => format!(
                "{}?q={}&kl={}",
                endpoints.duckduckgo_url,
                q,
                locale.duckduckgo_locale(country)
            ),
            Self::Bing => format!(
                "{}?q={}&setlang={}&cc={}",
                endpoints.bing_url,
                q,
                language.unwrap_or_else(|| locale.bing_locale(country)),
                country.to_uppercase()
            ),
            Self::Google => format!(
                "{}?q={}&num=10&hl=en&gl={}&source=hp&ei=&iflsig=&ved=&uact=5&oq={}&gs_lcp=&sclient=gws-wiz",
                endpoints
                    .google_url
                    .replace("{domain}", locale.google_domain(country)),
                q,
                country.to_lowercase(),
                encode_component(query)
            ),
        }
    }

    /// Extracts product-page candidates from a results page
    ///
    /// Each anchor goes through the ad filter on its raw href, then redirect
    /// unwrapping, then the product gate. DuckDuckGo hits also have to pass the
    /// listing-page check. Google hits are deduplicated before capping.
    pub fn extract_candidates(&self, html: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(self.result_selector()) else {
            return Vec::new();
        };
        let document = Html::parse_document(html);
        let mut urls = Vec::new();

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if is_ad_link(href) {
                tracing::debug!("Skipping ad link: {}", href);
                continue;
            }

            let Some(actual) = decode_redirect(href) else {
                tracing::debug!("Dropping undecodable redirect: {}", href);
                continue;
            };

            let listing = *self == Self::DuckDuckGo && is_search_result_page(&actual);
            if !is_product_url(&actual) || listing {
                tracing::debug!("Filtered out URL: {}", actual);
                continue;
            }

            urls.push(actual);
        }

        if *self == Self::Google {
            let mut seen = HashSet::new();
            urls.retain(|url| seen.insert(url.clone()));
        }

        urls.truncate(self.max_candidates());
        urls
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Google => "Google",
        };
        f.write_str(name)
    }
}

/// Returns true when the HTML is a block or captcha page rather than results
///
/// Matching is case-sensitive on the raw markup.
pub fn is_blocked_page(html: &str) -> bool {
    BLOCK_PAGE_PHRASES.iter().any(|phrase| html.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_default_config;

    fn fixtures() -> (EngineConfig, LocaleResolver) {
        let config = load_default_config().unwrap();
        (config.engines.clone(), LocaleResolver::new(&config))
    }

    #[test]
    fn test_duckduckgo_url() {
        let (engines, locale) = fixtures();
        let url = SearchEngine::DuckDuckGo.search_url(&engines, &locale, "galaxy s24", "IN", None);
        assert_eq!(
            url,
            "https://duckduckgo.com/html/?q=galaxy%20s24%20buy%20online%20price&kl=in-en"
        );
    }

    #[test]
    fn test_bing_url_with_language_override() {
        let (engines, locale) = fixtures();
        let url = SearchEngine::Bing.search_url(&engines, &locale, "tv", "de", None);
        assert!(url.ends_with("&setlang=de-DE&cc=DE"));

        let url = SearchEngine::Bing.search_url(&engines, &locale, "tv", "DE", Some("en-GB"));
        assert!(url.contains("&setlang=en-GB&"));
    }

    #[test]
    fn test_google_url_uses_country_domain() {
        let (engines, locale) = fixtures();
        let url = SearchEngine::Google.search_url(&engines, &locale, "iphone 15", "UK", None);
        assert!(url.starts_with("https://google.co.uk/search?q=iphone%2015%20buy%20online%20price&num=10&hl=en&gl=uk"));
        assert!(url.contains("&oq=iphone%2015&"));
    }

    #[test]
    fn test_duckduckgo_candidates() {
        let html = r#"
            <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.ebay.com%2Fitm%2F1&rut=x">Galaxy</a></div>
            <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.amazon.com%2Fs%3Fk%3Dgalaxy">Listing</a></div>
            <div class="result"><a class="result__a" href="https://duckduckgo.com/y.js?ad_provider=bing&u3=x">Ad</a></div>
            <div class="result"><a class="result__a" href="https://www.walmart.com/ip/galaxy/99?q=galaxy">Query</a></div>
            <div class="result"><a class="result__a" href="https://en.wikipedia.org/wiki/Galaxy">Wiki</a></div>
        "#;
        assert_eq!(
            SearchEngine::DuckDuckGo.extract_candidates(html),
            vec!["https://www.ebay.com/itm/1".to_string()]
        );
    }

    #[test]
    fn test_listing_check_only_on_duckduckgo() {
        let html = r#"<h2><a href="https://www.walmart.com/ip/galaxy/99?q=galaxy">Galaxy</a></h2>"#;
        assert_eq!(SearchEngine::Bing.extract_candidates(html).len(), 1);
    }

    #[test]
    fn test_caps() {
        let anchors: String = (0..12)
            .map(|i| format!(r#"<h2><a href="https://www.ebay.com/itm/{}">x</a></h2>"#, i))
            .collect();
        assert_eq!(SearchEngine::Bing.extract_candidates(&anchors).len(), 8);

        let anchors: String = (0..12)
            .map(|i| format!(r#"<h3><a href="https://www.ebay.com/itm/{}">x</a></h3>"#, i % 3))
            .collect();
        // Duplicates collapse before the cap of five
        assert_eq!(SearchEngine::Google.extract_candidates(&anchors).len(), 3);
    }

    #[test]
    fn test_block_page_detection() {
        assert!(is_blocked_page("<p>Our systems have detected unusual traffic</p>"));
        assert!(is_blocked_page("<div id=\"captcha-form\"></div>"));
        assert!(!is_blocked_page("<p>ACCESS DENIED</p>"));
        assert!(!is_blocked_page("<h3><a href=\"https://www.ebay.com/itm/1\">x</a></h3>"));
    }
}
