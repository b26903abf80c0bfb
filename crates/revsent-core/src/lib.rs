pub mod error;
pub mod review;
pub mod sentiment;

pub use error::{InvalidInputError, ValidationError};
pub use review::{MAX_RATING, MIN_RATING, MIN_TEXT_LEN, NewReview, Review, ReviewId, ReviewPatch};
pub use sentiment::{ScoredReview, Sentiment, SentimentLabel, SentimentStatBucket, SentimentStats};
