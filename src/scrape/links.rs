//! Item link extraction from the listing page

use crate::config::link_selector;
use crate::scrape::query::{HtmlPage, PageQuery};
use crate::Result;

/// Extracts absolute item URLs from listing-page HTML
///
/// Every anchor whose `href` starts with `link_prefix` is kept, in document
/// order. Duplicates are not removed, so a link repeated on the page is
/// scraped twice. A page without matching anchors yields an empty vector.
///
/// # Example
///
/// ```
/// use shirt_scraper::scrape::extract_links;
///
/// let html = r#"<a href="shirt.php?id=101">Logo Shirt</a><a href="/contact.php">Contact</a>"#;
/// let links = extract_links(html, "http://shirts4mike.com", "shirt.php?id=").unwrap();
/// assert_eq!(links, vec!["http://shirts4mike.com/shirt.php?id=101"]);
/// ```
pub fn extract_links(html: &str, site_origin: &str, link_prefix: &str) -> Result<Vec<String>> {
    let page = HtmlPage::parse(html);
    extract_links_from(&page, site_origin, link_prefix)
}

/// Same as [`extract_links`] over any [`PageQuery`]
pub fn extract_links_from(
    page: &impl PageQuery,
    site_origin: &str,
    link_prefix: &str,
) -> Result<Vec<String>> {
    let hrefs = page.select_attrs(&link_selector(link_prefix), "href")?;

    Ok(hrefs
        .iter()
        .map(|href| absolute_url(site_origin, href))
        .collect())
}

/// Joins the site origin and a site-relative path with exactly one `/`
pub(crate) fn absolute_url(site_origin: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        site_origin.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}
