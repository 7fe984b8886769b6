use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::rating::Rating;

/// The two sellable varieties. Only food carries a best-before date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variety {
    Drink,
    Food { best_before: NaiveDate },
}

/// A sellable item. Conceptually immutable: re-rating produces a new value
/// via [`Product::with_rating`] rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: u32,
    name: String,
    price: Decimal,
    rating: Rating,
    variety: Variety,
}

impl Product {
    pub fn drink(
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
    ) -> Result<Self, CatalogError> {
        Product::new(id, name.into(), price, rating, Variety::Drink)
    }

    pub fn food(
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Result<Self, CatalogError> {
        Product::new(id, name.into(), price, rating, Variety::Food { best_before })
    }

    fn new(
        id: u32,
        name: String,
        price: Decimal,
        rating: Rating,
        variety: Variety,
    ) -> Result<Self, CatalogError> {
        if price.is_sign_negative() {
            return Err(CatalogError::Construction(format!(
                "negative price {} for product {}",
                price, id
            )));
        }
        Ok(Product {
            id,
            name,
            price,
            rating,
            variety,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn variety(&self) -> &Variety {
        &self.variety
    }

    /// The stored date for food; drinks are best today.
    pub fn best_before(&self) -> NaiveDate {
        match self.variety {
            Variety::Food { best_before } => best_before,
            Variety::Drink => Local::now().date_naive(),
        }
    }

    /// Discount rate applied to every product: 10%.
    pub fn discount_rate() -> Decimal {
        Decimal::new(1, 1)
    }

    /// `price × 10%`, rounded half-up to two fractional digits.
    pub fn discount(&self) -> Decimal {
        (self.price * Self::discount_rate())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Same product, new aggregate rating.
    pub fn with_rating(&self, rating: Rating) -> Product {
        let mut product = self.clone();
        product.rating = rating;
        product
    }
}

// Catalog identity is the id alone; two values sharing an id are the same
// entry regardless of their other fields.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.id,
            self.name,
            self.price,
            self.discount(),
            self.rating.stars(),
            self.best_before()
        )
    }
}
