//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to stand in for the shop and test the full
//! fetch → extract → write cycle end-to-end.

use chrono::NaiveDate;
use shirt_scraper::config::Config;
use shirt_scraper::scrape::{Pipeline, Record};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock shop
fn create_test_config(base_url: &str, workdir: &Path) -> Config {
    let mut config = Config::default();
    config.scraper.entry_url = format!("{}/shirts.php", base_url);
    config.scraper.site_origin = base_url.to_string();
    config.output.data_dir = workdir.join("data");
    config.output.error_log_path = workdir.join("scraper-error.log");
    config
}

fn listing_page(ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><a href="shirt.php?id={id}"><img src="img/shirts/shirt-{id}.jpg" alt="Shirt {id}"><p>View Details</p></a></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
            <div class="header"><a href="./">Home</a><a href="shirts.php">Shirts</a><a href="contact.php">Contact</a></div>
            <ul class="products">{items}</ul>
        </body></html>"#
    )
}

fn item_page(id: &str, title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
            <div class="section page"><div class="wrapper">
                <div class="breadcrumb"><a href="shirts.php">Shirts</a> &gt; {title}</div>
                <div class="shirt-picture"><span><img src="img/shirts/shirt-{id}.jpg" alt="{title}"></span></div>
                <div class="shirt-details">
                    <h1><span class="price">{price}</span> {title}</h1>
                    <input type="submit" value="Add to Cart">
                </div>
            </div></div>
        </body></html>"#
    )
}

async fn mount_listing(server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/shirts.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(ids)))
        .mount(server)
        .await;
}

async fn mount_item(server: &MockServer, id: &str, title: &str, price: &str) {
    Mock::given(method("GET"))
        .and(path("/shirt.php"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(item_page(id, title, price)))
        .mount(server)
        .await;
}

fn read_records(path: &Path) -> Vec<Record> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open snapshot");
    reader
        .deserialize()
        .collect::<Result<Vec<Record>, _>>()
        .expect("Failed to parse snapshot")
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read data dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[tokio::test]
async fn test_full_run_writes_snapshot() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_listing(&mock_server, &["101", "102"]).await;
    mount_item(&mock_server, "101", "Logo Shirt, Red", "$18").await;
    mount_item(&mock_server, "102", "Mike the Frog Shirt, Black", "$20").await;

    let pipeline = Pipeline::new(create_test_config(&base_url, workdir.path())).unwrap();
    let report = pipeline.run_on(run_date()).await;

    assert!(!report.aborted);
    assert_eq!(report.links_found, 2);
    assert_eq!(report.records_written, 2);
    assert_eq!(report.failed_items, 0);

    let output = report.output_path.expect("Snapshot should be written");
    assert_eq!(output, workdir.path().join("data").join("2024-03-05.csv"));

    let header = std::fs::read_to_string(&output).unwrap();
    assert!(header.starts_with("title,price,imageURL,URL,time\n"));

    let records = read_records(&output);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].title, "Logo Shirt, Red");
    assert_eq!(records[0].price, "$18");
    assert_eq!(
        records[0].image_url,
        format!("{}/img/shirts/shirt-101.jpg", base_url)
    );
    assert_eq!(records[0].source_url, format!("{}/shirt.php?id=101", base_url));
    assert_eq!(records[0].time.len(), 8);

    assert_eq!(records[1].title, "Mike the Frog Shirt, Black");
    assert_eq!(records[1].source_url, format!("{}/shirt.php?id=102", base_url));

    // Nothing failed, so nothing was logged
    assert!(!workdir.path().join("scraper-error.log").exists());
}

#[tokio::test]
async fn test_failed_item_is_logged_and_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_listing(&mock_server, &["101", "102", "103"]).await;
    mount_item(&mock_server, "101", "Logo Shirt, Red", "$18").await;
    Mock::given(method("GET"))
        .and(path("/shirt.php"))
        .and(query_param("id", "102"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_item(&mock_server, "103", "Mike the Frog Shirt, Orange", "$25").await;

    let pipeline = Pipeline::new(create_test_config(&base_url, workdir.path())).unwrap();
    let report = pipeline.run_on(run_date()).await;

    assert!(!report.aborted);
    assert_eq!(report.links_found, 3);
    assert_eq!(report.records_written, 2);
    assert_eq!(report.failed_items, 1);

    let records = read_records(&report.output_path.unwrap());
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Logo Shirt, Red", "Mike the Frog Shirt, Orange"]);

    let log = std::fs::read_to_string(workdir.path().join("scraper-error.log")).unwrap();
    let expected = format!(
        "Connection error: There's been a 404 error. Cannot connect to {}/shirt.php?id=102.\n\n",
        base_url
    );
    assert!(log.ends_with(&expected), "unexpected log: {}", log);
}

#[tokio::test]
async fn test_rerun_replaces_previous_snapshot() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_listing(&mock_server, &["101"]).await;
    mount_item(&mock_server, "101", "Logo Shirt, Red", "$18").await;

    // A snapshot left over from an earlier day
    let data_dir = workdir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("2024-03-04.csv"), "title,price,imageURL,URL,time\n").unwrap();

    let pipeline = Pipeline::new(create_test_config(&base_url, workdir.path())).unwrap();
    pipeline.run_on(run_date()).await;
    assert_eq!(csv_files(&data_dir), vec!["2024-03-05.csv"]);

    // Same-day rerun replaces rather than appends
    let report = pipeline.run_on(run_date()).await;
    assert_eq!(csv_files(&data_dir), vec!["2024-03-05.csv"]);
    assert_eq!(read_records(&report.output_path.unwrap()).len(), 1);
}

#[tokio::test]
async fn test_unreachable_listing_logs_network_error() {
    let workdir = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:1", workdir.path());

    let pipeline = Pipeline::new(config).unwrap();
    let report = pipeline.run_on(run_date()).await;

    assert!(report.aborted);
    assert_eq!(report.output_path, None);

    let log = std::fs::read_to_string(workdir.path().join("scraper-error.log")).unwrap();
    assert!(
        log.ends_with("\nRequest to http://127.0.0.1:1/shirts.php failed.\n\n"),
        "unexpected log: {}",
        log
    );
}

#[tokio::test]
async fn test_duplicate_links_are_scraped_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_listing(&mock_server, &["101", "101"]).await;
    mount_item(&mock_server, "101", "Logo Shirt, Red", "$18").await;

    let pipeline = Pipeline::new(create_test_config(&base_url, workdir.path())).unwrap();
    let links = vec![
        format!("{}/shirt.php?id=101", base_url),
        format!("{}/shirt.php?id=101", base_url),
    ];
    let outcomes = pipeline.scrape_items(&links).await;
    assert!(outcomes.iter().all(|o| o.is_ok()));

    let report = pipeline.run_on(run_date()).await;
    assert_eq!(report.links_found, 2);
    assert_eq!(read_records(&report.output_path.unwrap()).len(), 2);
}
