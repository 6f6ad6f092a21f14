//! Scrape pipeline - composes the fetch, extract and write stages
//!
//! A run is strictly linear:
//! 1. Fetch the listing page
//! 2. Extract item links
//! 3. Fetch and extract every item concurrently, then join
//! 4. Write the successful records to the CSV snapshot
//!
//! Any failure is routed to the error log. A failing item only loses its own
//! record; a failure in steps 1-2 ends the run before anything is written.

use crate::config::Config;
use crate::output::{CsvWriter, ErrorLog};
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::scrape::links::extract_links;
use crate::scrape::record::{extract_record, Record};
use crate::Result;
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use reqwest::Client;
use std::path::PathBuf;

/// Outcome of scraping one item link
#[derive(Debug)]
pub struct ItemOutcome {
    /// The item page URL
    pub url: String,

    /// The extracted record (with `source_url` set), or why it failed
    pub result: Result<Record>,
}

impl ItemOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Item links found on the listing page
    pub links_found: usize,

    /// Records that made it into the snapshot
    pub records_written: usize,

    /// Item links whose fetch or extraction failed
    pub failed_items: usize,

    /// Where the snapshot was written, if the write succeeded
    pub output_path: Option<PathBuf>,

    /// True when the run stopped before reaching the writer
    pub aborted: bool,
}

/// The scrape pipeline for one configuration
pub struct Pipeline {
    config: Config,
    client: Client,
    writer: CsvWriter,
    error_log: ErrorLog,
}

impl Pipeline {
    /// Creates a pipeline, building the HTTP client from `config`
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config)?;
        let writer = CsvWriter::new(&config.output.data_dir);
        let error_log = ErrorLog::new(&config.output.error_log_path);

        Ok(Self {
            config,
            client,
            writer,
            error_log,
        })
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Runs the pipeline, naming the snapshot after today's local date
    pub async fn run(&self) -> RunReport {
        self.run_on(Local::now().date_naive()).await
    }

    /// Runs the pipeline, naming the snapshot after `date`
    ///
    /// Never fails: every error has already been written to the error log by
    /// the time this returns, and is reflected in the report.
    pub async fn run_on(&self, date: NaiveDate) -> RunReport {
        self.writer.ensure_dir();

        let mut report = RunReport::default();
        if let Err(e) = self.try_run(date, &mut report).await {
            self.error_log.log_error(&e);
            report.aborted = true;
        }

        tracing::info!(
            "Run finished: {} links, {} records written, {} failed items{}",
            report.links_found,
            report.records_written,
            report.failed_items,
            if report.aborted { " (aborted)" } else { "" }
        );

        report
    }

    async fn try_run(&self, date: NaiveDate, report: &mut RunReport) -> Result<()> {
        let scraper = &self.config.scraper;

        tracing::info!("Fetching listing page {}", scraper.entry_url);
        let listing = fetch_page(&self.client, &scraper.entry_url).await?;

        let links = extract_links(&listing, &scraper.site_origin, &scraper.link_prefix)?;
        report.links_found = links.len();
        tracing::info!("Found {} item links", links.len());

        let outcomes = self.scrape_items(&links).await;

        let mut records = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome.result {
                Ok(record) => records.push(record),
                Err(e) => {
                    report.failed_items += 1;
                    self.error_log.log_error(&e);
                }
            }
        }

        // A failed write is logged but does not abort the run
        match self.writer.write(&records, date) {
            Ok(path) => {
                report.records_written = records.len();
                report.output_path = Some(path);
            }
            Err(e) => self.error_log.log_error(&e),
        }

        Ok(())
    }

    /// Fetches and extracts every link concurrently
    ///
    /// All requests are in flight at once and the call returns only when
    /// every one has settled. Outcomes are in the same order as `links`.
    pub async fn scrape_items(&self, links: &[String]) -> Vec<ItemOutcome> {
        join_all(links.iter().map(|url| self.scrape_item(url.clone()))).await
    }

    async fn scrape_item(&self, url: String) -> ItemOutcome {
        let result = match fetch_page(&self.client, &url).await {
            Ok(html) => extract_record(&html, &self.config.scraper).map(|mut record| {
                record.source_url = url.clone();
                record
            }),
            Err(e) => Err(e),
        };

        match &result {
            Ok(record) => tracing::debug!("Scraped '{}' from {}", record.title, url),
            Err(e) => tracing::debug!("Item {} failed: {}", url, e),
        }

        ItemOutcome { url, result }
    }
}
