//! The persisted review record and the inputs that create or edit it.
//!
//! Validation here is what the presentation layer enforces before any text
//! reaches the scorer: required fields, a 10-character floor on review text,
//! and a 1..=5 star rating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, ValidationError};
use crate::sentiment::{ScoredReview, SentimentLabel};

/// Minimum review text length, in characters.
pub const MIN_TEXT_LEN: usize = 10;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Store-assigned review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub i64);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored review.
///
/// `sentiment` and `score` are always copies of the scorer's output for the
/// current `review_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: String,
    pub product_name: String,
    pub review_text: String,
    pub rating: u8,
    pub sentiment: SentimentLabel,
    pub score: f64,
    /// RFC 3339 UTC timestamp, microsecond precision.
    pub created_at: String,
    /// RFC 3339 UTC timestamp, microsecond precision.
    pub updated_at: String,
}

impl Review {
    /// Project into the aggregator's view, re-checking the sentiment invariants.
    pub fn to_scored(&self) -> Result<ScoredReview, InvalidInputError> {
        ScoredReview::new(
            self.review_text.clone(),
            i64::from(self.rating),
            self.sentiment,
            self.score,
        )
    }
}

/// Unvalidated input for a new review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub product_name: String,
    pub review_text: String,
    pub rating: i64,
}

impl NewReview {
    /// Check required fields, text length, and rating range.
    ///
    /// On success the product name is returned trimmed.
    pub fn validate(self) -> Result<NewReview, ValidationError> {
        let product_name = self.product_name.trim().to_string();
        if product_name.is_empty() || self.review_text.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        check_text(&self.review_text)?;
        check_rating(self.rating)?;
        Ok(NewReview {
            product_name,
            review_text: self.review_text,
            rating: self.rating,
        })
    }
}

/// Partial edit of an existing review. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub product_name: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i64>,
}

impl ReviewPatch {
    /// Validate whichever fields are present. A blank product name counts as
    /// a missing required field; present but empty text is too short.
    pub fn validate(self) -> Result<ReviewPatch, ValidationError> {
        let product_name = match self.product_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(ValidationError::MissingFields);
                }
                Some(name)
            }
            None => None,
        };
        if let Some(text) = &self.review_text {
            check_text(text)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        Ok(ReviewPatch {
            product_name,
            review_text: self.review_text,
            rating: self.rating,
        })
    }
}

fn check_text(text: &str) -> Result<(), ValidationError> {
    let actual = text.chars().count();
    if actual < MIN_TEXT_LEN {
        return Err(ValidationError::TextTooShort {
            min: MIN_TEXT_LEN,
            actual,
        });
    }
    Ok(())
}

fn check_rating(rating: i64) -> Result<(), ValidationError> {
    if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}
