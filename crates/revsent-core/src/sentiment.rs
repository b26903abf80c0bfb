//! Sentiment labels, scored reviews, and aggregate statistics.
//!
//! A [`ScoredReview`] is the logical view of a review that the aggregator
//! works on: text, rating, and the label/score pair the scorer produced.
//! Identity, ownership, and timestamps live on the persisted
//! [`Review`](crate::Review) instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::review::{MAX_RATING, MIN_RATING};

/// Sentiment class of a piece of text.
///
/// Variants are declared in name order so the derived `Ord` sorts
/// `Negative < Neutral < Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }

    /// The label implied by the sign of a score (raw or normalized).
    pub fn from_sign(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Negative" => Ok(Self::Negative),
            "Neutral" => Ok(Self::Neutral),
            "Positive" => Ok(Self::Positive),
            other => Err(InvalidInputError::UnknownLabel(other.to_string())),
        }
    }
}

/// Scorer output: a label and a normalized score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        label: SentimentLabel::Neutral,
        score: 0.0,
    };
}

/// A review with its sentiment fields filled in.
///
/// Fields are private so every instance satisfies the invariants checked in
/// [`ScoredReview::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    text: String,
    rating: u8,
    sentiment_label: SentimentLabel,
    score: f64,
}

impl ScoredReview {
    /// Build a scored review, checking that:
    ///
    /// - `text` is non-empty,
    /// - `rating` is in `1..=5`,
    /// - `score` is finite and in `[-1, 1]`,
    /// - `label` agrees with the sign of `score`.
    pub fn new(
        text: impl Into<String>,
        rating: i64,
        label: SentimentLabel,
        score: f64,
    ) -> Result<Self, InvalidInputError> {
        let text = text.into();
        if text.is_empty() {
            return Err(InvalidInputError::EmptyText);
        }
        if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&rating) {
            return Err(InvalidInputError::Rating(rating));
        }
        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(InvalidInputError::Score(score));
        }
        if SentimentLabel::from_sign(score) != label {
            return Err(InvalidInputError::LabelMismatch {
                label: label.to_string(),
                score,
            });
        }
        Ok(Self {
            text,
            rating: rating as u8,
            sentiment_label: label,
            score,
        })
    }

    /// Pair freshly scored text with a rating.
    pub fn from_sentiment(
        text: impl Into<String>,
        rating: i64,
        sentiment: Sentiment,
    ) -> Result<Self, InvalidInputError> {
        Self::new(text, rating, sentiment.label, sentiment.score)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn sentiment_label(&self) -> SentimentLabel {
        self.sentiment_label
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Statistics for all reviews sharing one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStatBucket {
    pub label: SentimentLabel,
    pub count: usize,
    pub average_score: f64,
    pub average_rating: f64,
}

/// Aggregate over a set of scored reviews.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total_count: usize,
    /// One bucket per label present in the input, sorted by label name.
    pub buckets: Vec<SentimentStatBucket>,
}

impl SentimentStats {
    pub fn bucket(&self, label: SentimentLabel) -> Option<&SentimentStatBucket> {
        self.buckets.iter().find(|b| b.label == label)
    }
}
