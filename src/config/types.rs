use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Shirt-Scraper
///
/// Every section and key is optional; anything left out falls back to the
/// built-in shirts4mike.com defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// What to scrape and how to find it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// The listing page the run starts from
    #[serde(rename = "entry-url")]
    pub entry_url: String,

    /// Origin prepended to relative item links and image sources
    #[serde(rename = "site-origin")]
    pub site_origin: String,

    /// Anchors whose href starts with this prefix are item links
    #[serde(rename = "link-prefix")]
    pub link_prefix: String,

    /// Selector for the product image (title comes from its `alt`)
    #[serde(rename = "picture-selector")]
    pub picture_selector: String,

    /// Selector for the price element(s)
    #[serde(rename = "price-selector")]
    pub price_selector: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            entry_url: "http://shirts4mike.com/shirts.php".to_string(),
            site_origin: "http://shirts4mike.com".to_string(),
            link_prefix: "shirt.php?id=".to_string(),
            picture_selector: ".shirt-picture img".to_string(),
            price_selector: ".shirt-details .price".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "shirt-scraper".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the dated CSV snapshot
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// Append-only error log
    #[serde(rename = "error-log-path")]
    pub error_log_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            error_log_path: PathBuf::from("./scraper-error.log"),
        }
    }
}
