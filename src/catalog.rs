//! The shared product→reviews store. Every operation goes through one
//! read/write lock; write holders are mutually exclusive, read holders may
//! run concurrently with each other but never with a writer.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use log::{error, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::locale::{self, Formatter};
use crate::product::Product;
use crate::rating::{average_rating, Rating};
use crate::records::RecordFormat;
use crate::review::Review;

/// One catalog entry: the latest product value and every review submitted
/// for it. The two always move together; a review list is never orphaned
/// from its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Entry {
    pub(crate) product: Product,
    pub(crate) reviews: Vec<Review>,
}

/// The catalog store, keyed by the stable product id.
///
/// Clone-friendly: cloning shares the same underlying storage, so worker
/// threads each hold their own handle to one store.
#[derive(Clone)]
pub struct Catalog {
    pub(crate) entries: Arc<RwLock<HashMap<u32, Entry>>>,
    pub(crate) config: Arc<CatalogConfig>,
    pub(crate) format: RecordFormat,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        let format = RecordFormat::new(config.delimiter);
        Catalog {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
            format,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn record_format(&self) -> RecordFormat {
        self.format
    }

    /// The fixed set of language tags the report and discount operations
    /// understand.
    pub fn supported_locales() -> Vec<&'static str> {
        locale::supported_tags()
    }

    pub(crate) fn read_entries(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, HashMap<u32, Entry>>, CatalogError> {
        self.entries
            .read()
            .map_err(|_| CatalogError::LockPoisoned(operation))
    }

    pub(crate) fn write_entries(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, HashMap<u32, Entry>>, CatalogError> {
        self.entries
            .write()
            .map_err(|_| CatalogError::LockPoisoned(operation))
    }

    /// Add a drink with an empty review list, unless the id is already
    /// taken: creation is an idempotent no-op on an existing id. Returns
    /// the constructed product; construction failures are logged and yield
    /// `None`, never an error.
    pub fn create_drink(
        &self,
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
    ) -> Option<Product> {
        self.create(Product::drink(id, name, price, rating))
    }

    /// Food variant of [`Catalog::create_drink`], with a best-before date.
    pub fn create_food(
        &self,
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Option<Product> {
        self.create(Product::food(id, name, price, rating, best_before))
    }

    fn create(&self, product: Result<Product, CatalogError>) -> Option<Product> {
        let product = match product {
            Ok(product) => product,
            Err(err) => {
                warn!("product not created: {}", err);
                return None;
            }
        };
        let mut entries = match self.write_entries("create") {
            Ok(entries) => entries,
            Err(err) => {
                error!("product {} not created: {}", product.id(), err);
                return None;
            }
        };
        entries.entry(product.id()).or_insert_with(|| Entry {
            product: product.clone(),
            reviews: Vec::new(),
        });
        Some(product)
    }

    /// Look a product up by id. `NotFound` is always surfaced here; it is
    /// the only way a caller can detect a bad id.
    pub fn find_product(&self, id: u32) -> Result<Product, CatalogError> {
        let entries = self.read_entries("find")?;
        entries
            .get(&id)
            .map(|entry| entry.product.clone())
            .ok_or(CatalogError::NotFound { id })
    }

    /// The reviews submitted for a product, in submission order.
    pub fn reviews(&self, id: u32) -> Result<Vec<Review>, CatalogError> {
        let entries = self.read_entries("reviews")?;
        entries
            .get(&id)
            .map(|entry| entry.reviews.clone())
            .ok_or(CatalogError::NotFound { id })
    }

    /// Append a review and re-establish the aggregate-rating invariant:
    /// the stored product's rating becomes the rounded mean of all its
    /// reviews. Returns the re-rated product. A missing id is logged and
    /// yields `None`; review submission is best-effort by contract.
    pub fn review_product(
        &self,
        id: u32,
        rating: Rating,
        comments: impl Into<String>,
    ) -> Option<Product> {
        match self.try_review(id, rating, comments.into()) {
            Ok(product) => Some(product),
            Err(err) => {
                warn!("product {} not reviewed: {}", id, err);
                None
            }
        }
    }

    fn try_review(
        &self,
        id: u32,
        rating: Rating,
        comments: String,
    ) -> Result<Product, CatalogError> {
        let mut entries = self.write_entries("review")?;
        let entry = entries.get_mut(&id).ok_or(CatalogError::NotFound { id })?;
        entry.reviews.push(Review::new(rating, comments));
        let rated = entry.product.with_rating(average_rating(&entry.reviews));
        entry.product = rated.clone();
        Ok(rated)
    }

    /// A locale-formatted listing of every product matching `filter`,
    /// ordered by `sorter`, one line per product. Read-only.
    pub fn print_products<F, S>(&self, filter: F, sorter: S, language_tag: &str) -> String
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        let formatter = Formatter::for_tag(language_tag);
        let mut products: Vec<Product> = match self.read_entries("print") {
            Ok(entries) => entries
                .values()
                .map(|entry| entry.product.clone())
                .filter(|product| filter(product))
                .collect(),
            Err(err) => {
                error!("products not listed: {}", err);
                return String::new();
            }
        };
        products.sort_by(sorter);

        let mut txt = String::new();
        for product in &products {
            txt.push_str(&formatter.format_product(product));
            txt.push('\n');
        }
        txt
    }

    /// Total discount per star label, formatted as the locale's currency.
    pub fn get_discounts(&self, language_tag: &str) -> HashMap<String, String> {
        let formatter = Formatter::for_tag(language_tag);
        let mut totals: HashMap<&'static str, Decimal> = HashMap::new();
        match self.read_entries("discounts") {
            Ok(entries) => {
                for entry in entries.values() {
                    *totals
                        .entry(entry.product.rating().stars())
                        .or_insert(Decimal::ZERO) += entry.product.discount();
                }
            }
            Err(err) => {
                error!("discounts not computed: {}", err);
                return HashMap::new();
            }
        }
        totals
            .into_iter()
            .map(|(stars, total)| (stars.to_string(), formatter.format_money(total)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_entries("len").map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
