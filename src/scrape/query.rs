//! Narrow DOM query capability used by the extractors
//!
//! The extractors only ever need to select elements by CSS selector and read
//! an attribute or the text content. [`PageQuery`] captures exactly that, and
//! [`HtmlPage`] implements it on top of `scraper`.

use crate::{Result, ScrapeError};
use scraper::{Html, Selector};

/// Select-and-read access to a parsed page
pub trait PageQuery {
    /// Returns `attr` of every element matching `selector`, in document order
    ///
    /// Matching elements without the attribute are skipped.
    fn select_attrs(&self, selector: &str, attr: &str) -> Result<Vec<String>>;

    /// Returns `attr` of the first element matching `selector`
    fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>>;

    /// Returns the concatenated text content of every element matching `selector`
    ///
    /// No match yields an empty string.
    fn select_text(&self, selector: &str) -> Result<String>;
}

/// A parsed HTML document
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// Parses `html` as a full document
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl PageQuery for HtmlPage {
    fn select_attrs(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;

        Ok(self
            .document
            .select(&selector)
            .filter_map(|element| element.value().attr(attr))
            .map(str::to_string)
            .collect())
    }

    fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        let selector = parse_selector(selector)?;

        Ok(self
            .document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(attr))
            .map(str::to_string))
    }

    fn select_text(&self, selector: &str) -> Result<String> {
        let selector = parse_selector(selector)?;

        Ok(self
            .document
            .select(&selector)
            .flat_map(|element| element.text())
            .collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
