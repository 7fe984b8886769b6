//! Startup bulk load: one `product*` file per product in the data folder,
//! plus an optional per-product review file. Individual failures are logged
//! and skipped; only an unreadable data folder aborts the load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{error, info, warn};

use crate::catalog::{Catalog, Entry};
use crate::error::CatalogError;
use crate::product::Product;
use crate::rating::average_rating;
use crate::review::Review;

impl Catalog {
    /// Populate the catalog from the configured data folder, replacing any
    /// current content. Each product's rating is initialized from the
    /// rounded mean of its loaded reviews.
    pub fn load_all(&self) {
        match self.try_load_all() {
            Ok(count) => info!("loaded {} products", count),
            Err(err) => error!("catalog not loaded: {}", err),
        }
    }

    fn try_load_all(&self) -> Result<usize, CatalogError> {
        let mut loaded: HashMap<u32, Entry> = HashMap::new();
        for dir_entry in fs::read_dir(&self.config.data_folder)? {
            let path = match dir_entry {
                Ok(dir_entry) => dir_entry.path(),
                Err(err) => {
                    warn!("unreadable directory entry skipped: {}", err);
                    continue;
                }
            };
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !name.starts_with("product") {
                continue;
            }
            let product = match self.load_product(&path) {
                Some(product) => product,
                None => continue,
            };
            let reviews = self.load_reviews(product.id());
            let product = product.with_rating(average_rating(&reviews));
            loaded.insert(product.id(), Entry { product, reviews });
        }

        let count = loaded.len();
        let mut entries = self.write_entries("load")?;
        *entries = loaded;
        Ok(count)
    }

    /// First line of a product file, parsed as one product record. Failures
    /// are logged here so the caller can just skip.
    fn load_product(&self, path: &Path) -> Option<Product> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!("product file {} unreadable: {}", path.display(), err);
                return None;
            }
        };
        let line = match text.lines().next() {
            Some(line) => line,
            None => {
                warn!("product file {} is empty", path.display());
                return None;
            }
        };
        match self.format.parse_product(line) {
            Ok(product) => Some(product),
            Err(err) => {
                warn!("product record dropped: {}", err);
                None
            }
        }
    }

    /// A product's review history, one record per line. An absent file means
    /// zero reviews; malformed lines are dropped individually.
    fn load_reviews(&self, id: u32) -> Vec<Review> {
        let path = self.config.reviews_path(id);
        if !path.exists() {
            return Vec::new();
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!("review file {} unreadable: {}", path.display(), err);
                return Vec::new();
            }
        };
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match self.format.parse_review(line) {
                Ok(review) => Some(review),
                Err(err) => {
                    warn!("review record dropped: {}", err);
                    None
                }
            })
            .collect()
    }
}
