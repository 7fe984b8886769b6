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

fn write_data(root: &Path, name: &str, content: &str) {
    let folder = root.join("data");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join(name), content).unwrap();
}

#[test]
fn bulk_load_reads_products_and_reviews() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path(), "product101.txt", "D,101,Tea,1.99,0\n");
    write_data(dir.path(), "product103.txt", "F,103,Cake,3.99,0,2026-08-09\n");
    write_data(
        dir.path(),
        "reviews101.txt",
        "4,Nice hot cup of tea\n2,Rather weak tea\n4,Fine tea\n",
    );

    let catalog = Catalog::new(config_in(dir.path()));
    catalog.load_all();

    assert_eq!(catalog.len(), 2);

    let tea = catalog.find_product(101).unwrap();
    assert_eq!(tea.name(), "Tea");
    assert_eq!(tea.price(), Decimal::new(199, 2));
    // 10/3 rounds to 3
    assert_eq!(tea.rating(), Rating::ThreeStar);
    assert_eq!(catalog.reviews(101).unwrap().len(), 3);

    // no review file at all: zero reviews, not an error
    let cake = catalog.find_product(103).unwrap();
    assert_eq!(cake.rating(), Rating::NotRated);
    assert!(catalog.reviews(103).unwrap().is_empty());
}

#[test]
fn files_without_the_product_prefix_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path(), "product101.txt", "D,101,Tea,1.99,0\n");
    write_data(dir.path(), "notes.txt", "D,999,Smuggled,1.00,0\n");

    let catalog = Catalog::new(config_in(dir.path()));
    catalog.load_all();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_product(999).is_err());
}

#[test]
fn malformed_records_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path(), "product101.txt", "D,101,Tea,1.99,0\n");
    write_data(dir.path(), "product102.txt", "D,102,Coffee,cheap,0\n");
    write_data(dir.path(), "product104.txt", "D,104\n");
    write_data(dir.path(), "product105.txt", "F,105,Cookie,3.99,0,2026-08-09\n");
    write_data(
        dir.path(),
        "reviews101.txt",
        "4,Fine tea\nnot-a-rating,junk\n5,Perfect tea\n",
    );

    let catalog = Catalog::new(config_in(dir.path()));
    catalog.load_all();

    // the two well-formed products load, the rest are dropped
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.reviews(101).unwrap().len(), 2);
    // mean of 4 and 5 is 4.5, rounds up
    assert_eq!(catalog.find_product(101).unwrap().rating(), Rating::FiveStar);
}

#[test]
fn reload_replaces_current_content() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path(), "product101.txt", "D,101,Tea,1.99,0\n");

    let catalog = Catalog::new(config_in(dir.path()));
    catalog.create_drink(500, "Stale", Decimal::new(100, 2), Rating::NotRated);
    catalog.load_all();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_product(500).is_err());
    assert!(catalog.find_product(101).is_ok());
}

#[test]
fn dump_empties_and_restore_round_trips() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    catalog.review_product(101, Rating::FourStar, "Fine tea").unwrap();
    catalog.review_product(101, Rating::FiveStar, "Perfect tea").unwrap();
    catalog
        .create_food(
            103,
            "Cake",
            Decimal::new(399, 2),
            Rating::NotRated,
            chrono::NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
        )
        .unwrap();

    let tea_before = catalog.find_product(101).unwrap();
    let reviews_before = catalog.reviews(101).unwrap();

    catalog.dump();
    assert!(catalog.is_empty());
    assert_eq!(fs::read_dir(dir.path().join("tmp")).unwrap().count(), 1);

    catalog.restore();
    assert_eq!(catalog.len(), 2);

    let tea = catalog.find_product(101).unwrap();
    assert_eq!(tea.name(), tea_before.name());
    assert_eq!(tea.price(), tea_before.price());
    assert_eq!(tea.rating(), tea_before.rating());
    assert_eq!(catalog.reviews(101).unwrap(), reviews_before);

    let cake = catalog.find_product(103).unwrap();
    assert_eq!(cake.name(), "Cake");

    // consumed on successful restore
    assert_eq!(fs::read_dir(dir.path().join("tmp")).unwrap().count(), 0);
}

#[test]
fn restore_without_snapshot_keeps_the_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    fs::create_dir_all(dir.path().join("tmp")).unwrap();

    catalog.restore();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_product(101).is_ok());
}

#[test]
fn corrupt_snapshot_leaves_the_catalog_untouched() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));
    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    let tmp = dir.path().join("tmp");
    fs::create_dir_all(&tmp).unwrap();
    fs::write(tmp.join("catalog00000000000000000001.tmp"), b"not a snapshot").unwrap();

    catalog.restore();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_product(101).is_ok());
}

#[test]
fn restore_picks_the_most_recent_snapshot() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::new(config_in(dir.path()));

    catalog
        .create_drink(101, "Tea", Decimal::new(199, 2), Rating::NotRated)
        .unwrap();
    catalog.dump();

    catalog
        .create_drink(102, "Coffee", Decimal::new(175, 2), Rating::NotRated)
        .unwrap();
    catalog.dump();

    // latest first: the coffee-only snapshot
    catalog.restore();
    assert!(catalog.find_product(102).is_ok());
    assert!(catalog.find_product(101).is_err());

    // then the older one
    catalog.restore();
    assert!(catalog.find_product(101).is_ok());
    assert!(catalog.find_product(102).is_err());
}
