//! Price-Scout main entry point
//!
//! This is the command-line interface for the Price-Scout product price comparator.

use anyhow::{bail, Context};
use clap::Parser;
use price_scout::category::detect_product_category;
use price_scout::config::{load_config_with_hash, Config};
use price_scout::extract::platforms::is_brand_website;
use price_scout::{LocaleResolver, PriceComparator, SearchConfig, SortBy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Price-Scout: a federated product price comparator
///
/// Price-Scout looks a product up on general search engines, the e-commerce
/// platforms that operate in a country and the official sites of brands in the
/// product's category, then prints the offers it found as JSON.
#[derive(Parser, Debug)]
#[command(name = "price-scout")]
#[command(version = "1.0.0")]
#[command(about = "A federated product price comparator", long_about = None)]
struct Cli {
    /// Product to search for, e.g. "Samsung Galaxy S24"
    #[arg(value_name = "QUERY", required_unless_present = "countries")]
    query: Option<String>,

    /// Country to search in (two-letter code)
    #[arg(short, long, default_value = "US")]
    country: String,

    /// Maximum number of results to print
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Result order: price, rating or relevance
    #[arg(short, long, default_value = "price")]
    sort_by: SortBy,

    /// Report prices in this currency code instead of the country's own
    #[arg(long)]
    currency: Option<String>,

    /// Search-engine interface language, e.g. "de"
    #[arg(long)]
    language: Option<String>,

    /// Path to a TOML file replacing the built-in reference tables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show which sources would be searched without making any request
    #[arg(long, conflicts_with = "countries")]
    dry_run: bool,

    /// List the supported countries and exit
    #[arg(long)]
    countries: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, hash) = load_config_with_hash(cli.config.as_deref())
        .context("Failed to load configuration")?;
    tracing::info!("Reference tables loaded (hash: {})", hash);

    if cli.countries {
        handle_countries(&config);
        return Ok(());
    }

    let Some(query) = cli.query.as_deref() else {
        bail!("a product query is required");
    };

    let mut search = SearchConfig::new(&cli.country).with_sort_by(cli.sort_by);
    if let Some(max_results) = cli.max_results {
        search = search.with_max_results(max_results);
    }
    search.currency = cli.currency.map(|c| c.to_uppercase());
    search.language = cli.language;

    if cli.dry_run {
        return handle_dry_run(&config, query, &search);
    }

    handle_compare(config, query, &search).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_scout=info,warn"),
            1 => EnvFilter::new("price_scout=debug,info"),
            2 => EnvFilter::new("price_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --countries mode: prints the supported-country table
fn handle_countries(config: &Config) {
    let locale = LocaleResolver::new(config);
    println!("{:<6}{:<20}{:<10}{}", "Code", "Country", "Currency", "Google");
    for entry in locale.supported_countries() {
        println!(
            "{:<6}{:<20}{:<10}{}",
            entry.code,
            entry.name,
            entry.currency,
            locale.google_domain(&entry.code)
        );
    }
}

/// Handles the --dry-run mode: shows the sources a search would use
fn handle_dry_run(config: &Config, query: &str, search: &SearchConfig) -> anyhow::Result<()> {
    let locale = LocaleResolver::new(config);
    let Some(country) = locale.country_config(&search.country) else {
        bail!("Country {} is not supported", search.country);
    };

    println!("=== Price-Scout Dry Run ===\n");
    println!("Query: {}", query);
    println!(
        "Country: {} (currency {})",
        country.code,
        search.currency.as_deref().unwrap_or(&country.currency)
    );
    println!("Sort by: {}", search.sort_by);

    println!("\nSearch Engines:");
    println!("  DuckDuckGo locale: {}", locale.duckduckgo_locale(&country.code));
    println!("  Bing locale: {}", locale.bing_locale(&country.code));
    println!("  Google domain: {}", locale.google_domain(&country.code));
    if let Some(language) = &search.language {
        println!("  Language override: {}", language);
    }

    let platforms = locale.ecommerce_websites(&country.code);
    println!("\nE-commerce Platforms ({}):", platforms.len());
    for website in &platforms {
        let kind = if is_brand_website(website) {
            "homepage scan"
        } else {
            "search page"
        };
        println!("  - {} ({})", website, kind);
    }

    match detect_product_category(query) {
        Some(category) => {
            let brands = locale.brand_websites(category);
            println!(
                "\nCategory: {}\nBrand Websites ({}):",
                category.name(),
                brands.len()
            );
            for website in &brands {
                println!("  - {}", website);
            }
        }
        None => println!("\nCategory: none detected, brand websites skipped"),
    }

    Ok(())
}

/// Handles the main comparison
async fn handle_compare(config: Config, query: &str, search: &SearchConfig) -> anyhow::Result<()> {
    let comparator = PriceComparator::new(config)?;

    let results = match comparator.compare(query, search).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Found {} results for \"{}\"", results.len(), query);

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
