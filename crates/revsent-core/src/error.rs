use thiserror::Error;

/// A scored record that breaks the sentiment invariants.
///
/// Raised when a [`ScoredReview`](crate::ScoredReview) is built from fields
/// that could not have come out of the scorer, e.g. a row read back from a
/// store that was edited by hand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("review text is empty")]
    EmptyText,

    #[error("rating {0} is outside 1..=5")]
    Rating(i64),

    #[error("score {0} is outside [-1, 1]")]
    Score(f64),

    #[error("label {label} does not match score {score}")]
    LabelMismatch { label: String, score: f64 },

    #[error("unknown sentiment label: {0}")]
    UnknownLabel(String),
}

/// Rejected review input, before anything is scored or stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name, review text, and rating are required")]
    MissingFields,

    #[error("Review text must be at least {min} characters")]
    TextTooShort { min: usize, actual: usize },

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange(i64),
}
