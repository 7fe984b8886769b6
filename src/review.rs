use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::rating::Rating;

/// A single customer review: a star rating and a free-text comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    comments: String,
}

impl Review {
    pub fn new(rating: Rating, comments: impl Into<String>) -> Self {
        Review {
            rating,
            comments: comments.into(),
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }
}

/// Report ordering: highest rating first. Ties keep their submission order
/// (the sorts using this comparator are stable).
pub fn by_rating_desc(a: &Review, b: &Review) -> Ordering {
    b.rating.cmp(&a.rating)
}
