//! Integration tests for the price comparator
//!
//! These tests use wiremock servers in place of the search engines, a
//! marketplace and a brand site, and run whole comparison requests end-to-end.

use price_scout::config::{Config, CountryEntry, EngineConfig, FetcherConfig, PlatformTables};
use price_scout::{PriceComparator, PriceError, SearchConfig, SortBy, PRICE_UNAVAILABLE};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a US-only configuration whose engines live on `engines`, whose only
/// marketplace is `marketplace` and whose only home-category brand is `brand`
fn create_test_config(engines: &str, marketplace: &str, brand: &str) -> Config {
    Config {
        fetcher: FetcherConfig {
            timeout_secs: 5,
            max_redirects: 5,
            throttle_min_ms: 0,
            throttle_max_ms: 0,
            throttled_hosts: vec![],
        },
        engines: EngineConfig {
            duckduckgo_url: format!("{}/ddg", engines),
            bing_url: format!("{}/bing", engines),
            google_url: format!("{}/google", engines),
        },
        countries: vec![CountryEntry {
            code: "US".to_string(),
            name: "United States".to_string(),
            currency: "USD".to_string(),
            duckduckgo_locale: Some("us-en".to_string()),
            bing_locale: Some("en-US".to_string()),
            google_domain: Some("google.com".to_string()),
        }],
        platforms: PlatformTables {
            global: vec![],
            domains: HashMap::new(),
            country_specific: HashMap::from([("US".to_string(), vec![marketplace.to_string()])]),
        },
        brands: HashMap::from([("home".to_string(), vec![brand.to_string()])]),
    }
}

fn page(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body.to_string())
}

fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body><h1>{}</h1><span class="price">{}</span></body></html>"#,
        title, price
    )
}

/// Mounts engines that find one working product page and one that answers 503,
/// with Google blocking us
async fn mount_engines(server: &MockServer) {
    let uri = server.uri();
    let working = format!("{}/product/floor-lamp-1", uri);
    let failing = format!("{}/product/samsung-galaxy-s24-ultra", uri);

    Mock::given(method("GET"))
        .and(path("/ddg"))
        .respond_with(page(
            200,
            &format!(
                r#"<a class="result__a" href="//duckduckgo.com/l/?uddg={}">Floor Lamp</a>"#,
                urlencode(&working)
            ),
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bing"))
        .respond_with(page(
            200,
            &format!(r#"<h2><a href="{}">Galaxy S24 Ultra</a></h2>"#, failing),
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/google"))
        .respond_with(page(200, "<p>Our systems have detected unusual traffic</p>"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/floor-lamp-1"))
        .respond_with(page(200, &product_page("Floor Lamp One", "$45.00")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/samsung-galaxy-s24-ultra"))
        .respond_with(page(503, "Service Unavailable"))
        .mount(server)
        .await;
}

async fn mount_marketplace(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(
            200,
            r#"<a href="/product/arc-floor-lamp">Arc Floor Lamp</a><a href="/product/rug">Wool Rug</a>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/arc-floor-lamp"))
        .respond_with(page(200, &product_page("Arc Floor Lamp", "$120.00")))
        .mount(server)
        .await;
}

async fn mount_brand(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(
            200,
            r#"<section><a href="/item/brass-lamp"><h2>Brass floor lamp</h2></a></section>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item/brass-lamp"))
        .respond_with(page(
            200,
            r#"<h1>Brass Floor Lamp</h1><span class="price">$80.00</span><div class="rating">4.8</div>"#,
        ))
        .mount(server)
        .await;
}

fn urlencode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

async fn start_all() -> (MockServer, MockServer, MockServer) {
    let engines = MockServer::start().await;
    let marketplace = MockServer::start().await;
    let brand = MockServer::start().await;
    mount_engines(&engines).await;
    mount_marketplace(&marketplace).await;
    mount_brand(&brand).await;
    (engines, marketplace, brand)
}

#[tokio::test]
async fn test_all_paths_merge_and_rank_by_price() {
    let (engines, marketplace, brand) = start_all().await;
    let config = create_test_config(&engines.uri(), &marketplace.uri(), &brand.uri());
    let comparator = PriceComparator::new(config).expect("Failed to build comparator");

    let results = comparator
        .search_product("floor lamp", &SearchConfig::new("us"))
        .await
        .expect("search should succeed");

    let summary: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.product_name.as_str(), r.price.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Floor Lamp One", "$45.00"),
            ("Brass Floor Lamp", "$80.00"),
            ("Arc Floor Lamp", "$120.00"),
            ("Samsung Galaxy S24", PRICE_UNAVAILABLE),
        ]
    );

    assert!(results.iter().all(|r| r.currency == "USD" && r.country == "US"));

    // The 503 page degrades to a URL-derived stub instead of failing the request
    let stub = &results[3];
    assert_eq!(
        stub.link,
        format!("{}/product/samsung-galaxy-s24-ultra", engines.uri())
    );
    assert_eq!(stub.annotations[3], "Source: URL Analysis");
}

#[tokio::test]
async fn test_rating_order_and_truncation() {
    let (engines, marketplace, brand) = start_all().await;
    let config = create_test_config(&engines.uri(), &marketplace.uri(), &brand.uri());
    let comparator = PriceComparator::new(config).expect("Failed to build comparator");

    let search = SearchConfig::new("US")
        .with_sort_by(SortBy::Rating)
        .with_max_results(2);
    let results = comparator
        .compare("floor lamp", &search)
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].product_name, "Brass Floor Lamp");
    assert_eq!(results[0].rating, Some(4.8));
}

#[tokio::test]
async fn test_currency_override_applies_to_every_result() {
    let (engines, marketplace, brand) = start_all().await;
    let config = create_test_config(&engines.uri(), &marketplace.uri(), &brand.uri());
    let comparator = PriceComparator::new(config).expect("Failed to build comparator");

    let mut search = SearchConfig::new("US");
    search.currency = Some("EUR".to_string());
    let results = comparator
        .search_product("floor lamp", &search)
        .await
        .expect("search should succeed");

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.currency == "EUR"));
}

#[tokio::test]
async fn test_unsupported_country_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(page(200, "<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &server.uri(), &server.uri());
    let comparator = PriceComparator::new(config).expect("Failed to build comparator");

    let result = comparator
        .search_product("floor lamp", &SearchConfig::new("IN"))
        .await;
    assert!(matches!(
        result,
        Err(PriceError::UnsupportedCountry { ref country }) if country == "IN"
    ));
}

#[tokio::test]
async fn test_everything_down_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(page(500, "Internal Server Error"))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &server.uri(), &server.uri());
    let comparator = PriceComparator::new(config).expect("Failed to build comparator");

    let results = comparator
        .search_product("floor lamp", &SearchConfig::new("US"))
        .await
        .expect("remote failures are not errors");
    assert!(results.is_empty());
}
