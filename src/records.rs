//! Flat-file record codec. One line encodes one product or one review;
//! malformed lines are reported as errors for the caller to drop and log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::product::{Product, Variety};
use crate::rating::Rating;
use crate::review::Review;

/// Product lines are `D,id,name,price,rating` for drinks and
/// `F,id,name,price,rating,best-before` for food; review lines are
/// `rating,comment`. The delimiter is configurable, the field order is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFormat {
    delimiter: char,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat { delimiter: ',' }
    }
}

impl RecordFormat {
    pub fn new(delimiter: char) -> Self {
        RecordFormat { delimiter }
    }

    pub fn parse_product(&self, line: &str) -> Result<Product, CatalogError> {
        let line = line.trim_end();
        let fields: Vec<&str> = line.split(self.delimiter).collect();
        if fields.len() < 5 {
            return Err(CatalogError::Parse(format!(
                "truncated product record: {}",
                line
            )));
        }
        let id: u32 = fields[1]
            .trim()
            .parse()
            .map_err(|_| CatalogError::Parse(format!("bad product id in record: {}", line)))?;
        let name = fields[2].trim().to_string();
        let price: Decimal = fields[3]
            .trim()
            .parse()
            .map_err(|_| CatalogError::Parse(format!("bad price in record: {}", line)))?;
        let ordinal: i64 = fields[4]
            .trim()
            .parse()
            .map_err(|_| CatalogError::Parse(format!("bad rating in record: {}", line)))?;
        let rating = Rating::from_ordinal(ordinal);

        match fields[0].trim() {
            "D" => Product::drink(id, name, price, rating),
            "F" => {
                let field = fields.get(5).ok_or_else(|| {
                    CatalogError::Parse(format!("food record without best-before date: {}", line))
                })?;
                let best_before =
                    NaiveDate::parse_from_str(field.trim(), "%Y-%m-%d").map_err(|_| {
                        CatalogError::Parse(format!("bad best-before date in record: {}", line))
                    })?;
                Product::food(id, name, price, rating, best_before)
            }
            other => Err(CatalogError::Parse(format!(
                "unknown product type '{}' in record: {}",
                other, line
            ))),
        }
    }

    /// The comment is everything after the first delimiter, so it may itself
    /// contain the delimiter.
    pub fn parse_review(&self, line: &str) -> Result<Review, CatalogError> {
        let line = line.trim_end();
        let (ordinal_field, comments) = line.split_once(self.delimiter).ok_or_else(|| {
            CatalogError::Parse(format!("review record missing comment: {}", line))
        })?;
        let ordinal: i64 = ordinal_field
            .trim()
            .parse()
            .map_err(|_| CatalogError::Parse(format!("bad rating in review record: {}", line)))?;
        Ok(Review::new(Rating::from_ordinal(ordinal), comments.trim()))
    }

    pub fn render_product(&self, product: &Product) -> String {
        let d = self.delimiter;
        let head = format!(
            "{}{}{}{}{}{}{}",
            product.id(),
            d,
            product.name(),
            d,
            product.price(),
            d,
            product.rating().ordinal()
        );
        match product.variety() {
            Variety::Drink => format!("D{}{}", d, head),
            Variety::Food { best_before } => {
                format!("F{}{}{}{}", d, head, d, best_before.format("%Y-%m-%d"))
            }
        }
    }

    pub fn render_review(&self, review: &Review) -> String {
        format!(
            "{}{}{}",
            review.rating().ordinal(),
            self.delimiter,
            review.comments()
        )
    }
}
