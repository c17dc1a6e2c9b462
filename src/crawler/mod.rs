//! Request pipeline: page fetching and price-comparison coordination
//!
//! This module contains:
//! - HTTP fetching with browser-like headers and host throttling
//! - The coordinator that runs a comparison request end to end

mod coordinator;
mod fetcher;

pub use coordinator::PriceComparator;
pub use fetcher::PageFetcher;
