//! Scrape module for fetching and extracting product data
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with failure classification
//! - Item link extraction from the listing page
//! - Record extraction from item pages
//! - The pipeline that ties the stages together

mod fetcher;
mod links;
mod pipeline;
mod query;
mod record;

pub use fetcher::{build_http_client, fetch_page};
pub use links::{extract_links, extract_links_from};
pub use pipeline::{ItemOutcome, Pipeline, RunReport};
pub use query::{HtmlPage, PageQuery};
pub use record::{extract_record, extract_record_at, extract_record_from, Record};

use crate::config::Config;
use crate::Result;

/// Runs one complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Fetch the listing page and extract item links
/// 3. Fetch and extract every item concurrently
/// 4. Replace the CSV snapshot with the new records
///
/// Only building the client can fail here; everything after that is logged
/// to the error log and summarized in the returned [`RunReport`].
pub async fn scrape(config: Config) -> Result<RunReport> {
    let pipeline = Pipeline::new(config)?;
    Ok(pipeline.run().await)
}
