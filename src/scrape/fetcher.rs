//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for the listing page and item pages
//! - Classifying failures as HTTP-status (`Connection`) or transport (`Network`)

use crate::config::Config;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// The user agent is `Name/Version`. Timeouts come from the `[scraper]`
/// section; redirects follow reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use shirt_scraper::config::Config;
/// use shirt_scraper::scrape::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client> {
    let user_agent = format!(
        "{}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.scraper.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.scraper.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a page and returns its body as text
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Status outside 2xx | `Connection { status, url }` |
/// | DNS failure, refused connection, timeout | `Network { url, reason }` |
/// | Body could not be read | `Network { url, reason }` |
///
/// The URL in a `Connection` error is the final one after redirects.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(|e| ScrapeError::Network {
        url: url.to_string(),
        reason: describe_transport_error(&e),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Connection {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    response.text().await.map_err(|e| ScrapeError::Network {
        url: url.to_string(),
        reason: describe_transport_error(&e),
    })
}

/// Produces a short reason string for a transport-level failure
fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        return "request timed out".to_string();
    }

    // reqwest wraps hyper/io errors; the innermost one names the actual cause
    let mut cause: &dyn std::error::Error = e;
    while let Some(inner) = cause.source() {
        cause = inner;
    }

    if e.is_connect() {
        format!("connection failed ({})", cause)
    } else {
        cause.to_string()
    }
}
