use serde::{Deserialize, Serialize};

use crate::review::Review;

/// Star classification used both per-review and as a product's aggregate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rating {
    NotRated,
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rating {
    /// Convert a raw ordinal into a rating. Anything outside 0..=5 is
    /// `NotRated`.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Rating::OneStar,
            2 => Rating::TwoStar,
            3 => Rating::ThreeStar,
            4 => Rating::FourStar,
            5 => Rating::FiveStar,
            _ => Rating::NotRated,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "☆☆☆☆☆",
            Rating::OneStar => "★☆☆☆☆",
            Rating::TwoStar => "★★☆☆☆",
            Rating::ThreeStar => "★★★☆☆",
            Rating::FourStar => "★★★★☆",
            Rating::FiveStar => "★★★★★",
        }
    }
}

/// Rounded mean of the reviews' rating ordinals; an empty slice averages to
/// zero stars. Rounding is half away from zero on the arithmetic mean.
pub fn average_rating(reviews: &[Review]) -> Rating {
    if reviews.is_empty() {
        return Rating::NotRated;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating().ordinal())).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    Rating::from_ordinal(mean.round() as i64)
}
