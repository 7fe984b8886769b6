use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tempfile::TempDir;

use stockroom::{Catalog, CatalogConfig, Rating};

fn config_in(root: &Path) -> CatalogConfig {
    let mut config = CatalogConfig::default();
    config.data_folder = root.join("data");
    config.reports_folder = root.join("reports");
    config.temp_folder = root.join("tmp");
    config
}

#[test]
fn report_lists_reviews_best_rating_first() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    catalog.review_product(101, Rating::TwoStar, "Rather weak tea").unwrap();
    catalog.review_product(101, Rating::FiveStar, "Perfect tea").unwrap();
    catalog.review_product(101, Rating::FourStar, "Fine tea").unwrap();

    let text = catalog.print_product_report(101, "en-US", "Client 1").unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Tea, $1.99, Rating:"));
    assert_eq!(lines[1], "Review: ★★★★★ Perfect tea");
    assert_eq!(lines[2], "Review: ★★★★☆ Fine tea");
    assert_eq!(lines[3], "Review: ★★☆☆☆ Rather weak tea");

    let written = fs::read_to_string(
        dir.path().join("reports/product101_report_Client 1.txt"),
    )
    .unwrap();
    assert_eq!(written, text);
}

#[test]
fn report_sorts_the_shared_review_list_in_place() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    catalog.review_product(101, Rating::TwoStar, "weak").unwrap();
    catalog.review_product(101, Rating::FiveStar, "perfect").unwrap();

    catalog.print_product_report(101, "en-US", "c1").unwrap();

    let ratings: Vec<Rating> = catalog
        .reviews(101)
        .unwrap()
        .iter()
        .map(|review| review.rating())
        .collect();
    assert_eq!(ratings, vec![Rating::FiveStar, Rating::TwoStar]);
}

#[test]
fn unreviewed_product_gets_the_no_reviews_marker() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();

    let text = catalog.print_product_report(101, "en-GB", "c1").unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "Not reviewed");
}

#[test]
fn unsupported_tag_reports_in_the_default_locale() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();

    let text = catalog.print_product_report(101, "xx-XX", "c1").unwrap();
    assert!(text.contains("Valoración"));
    assert!(text.lines().nth(1) == Some("No evaluado"));
}

#[test]
fn report_for_missing_product_is_absent() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));

    assert!(catalog.print_product_report(42, "en-US", "c1").is_none());
    assert!(!dir.path().join("reports/product42_report_c1.txt").exists());
}

#[test]
fn clients_get_their_own_report_files() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();

    catalog.print_product_report(101, "en-US", "c1").unwrap();
    catalog.print_product_report(101, "fr-FR", "c2").unwrap();

    assert!(dir.path().join("reports/product101_report_c1.txt").exists());
    assert!(dir.path().join("reports/product101_report_c2.txt").exists());
}
