//! Record extraction from a single item page

use crate::config::ScraperConfig;
use crate::scrape::links::absolute_url;
use crate::scrape::query::{HtmlPage, PageQuery};
use crate::Result;
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scraped product
///
/// Field order is the CSV column order. All values are kept as plain text;
/// the price is not parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,

    pub price: String,

    #[serde(rename = "imageURL")]
    pub image_url: String,

    /// The item page this record came from, attached by the pipeline
    #[serde(rename = "URL")]
    pub source_url: String,

    /// Wall-clock extraction time, `HH:MM:SS`
    pub time: String,
}

/// Extracts a record from item-page HTML, stamped with the current local time
///
/// Missing elements or attributes leave the matching field empty; nothing is
/// validated. `source_url` is always empty on return.
pub fn extract_record(html: &str, config: &ScraperConfig) -> Result<Record> {
    extract_record_at(html, config, Local::now().time())
}

/// Same as [`extract_record`] with an explicit timestamp
pub fn extract_record_at(html: &str, config: &ScraperConfig, time: NaiveTime) -> Result<Record> {
    let page = HtmlPage::parse(html);
    extract_record_from(&page, config, time)
}

/// Same as [`extract_record_at`] over any [`PageQuery`]
pub fn extract_record_from(
    page: &impl PageQuery,
    config: &ScraperConfig,
    time: NaiveTime,
) -> Result<Record> {
    let title = page
        .first_attr(&config.picture_selector, "alt")?
        .unwrap_or_default();

    let image_url = page
        .first_attr(&config.picture_selector, "src")?
        .map(|src| absolute_url(&config.site_origin, &src))
        .unwrap_or_default();

    let price = page.select_text(&config.price_selector)?;

    Ok(Record {
        title,
        price,
        image_url,
        source_url: String::new(),
        time: time.format("%H:%M:%S").to_string(),
    })
}
