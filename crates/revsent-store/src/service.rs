//! Review workflow: validation, ownership, scoring on write, aggregation on read.
//!
//! Every write that carries review text runs it through the [`Scorer`] and
//! copies the result into the stored record. Rating-only edits leave the
//! sentiment fields alone.

use chrono::{SecondsFormat, Utc};
use revsent_core::{NewReview, Review, ReviewId, ReviewPatch, SentimentStats, ValidationError};
use revsent_sentiment::{Scorer, aggregate};
use thiserror::Error;
use tracing::{debug, info};

use crate::StoreError;
use crate::store::{NewRecord, ReviewStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Access denied. No caller identity provided")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Review not found")]
    NotFound,

    #[error("Unauthorized access")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// HTTP-style status code for the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Store(_) => 500,
        }
    }

    /// Message safe to show a caller. Store failures are reported generically.
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub struct ReviewService<S> {
    store: S,
    scorer: Scorer,
}

impl<S: ReviewStore> ReviewService<S> {
    pub fn new(store: S, scorer: Scorer) -> Self {
        Self { store, scorer }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate, score, and persist a new review owned by `caller`.
    pub fn create(&self, caller: &str, input: NewReview) -> Result<Review, ServiceError> {
        let caller = require_caller(caller)?;
        let input = input.validate()?;
        let sentiment = self.scorer.classify(&input.review_text);
        debug!(label = %sentiment.label, score = sentiment.score, "classified review text");

        let review = self.store.insert(NewRecord {
            user_id: caller.to_string(),
            product_name: input.product_name,
            review_text: input.review_text,
            rating: input.rating as u8,
            sentiment,
            created_at: now(),
        })?;
        info!(id = %review.id, user_id = %caller, sentiment = %review.sentiment, "created review");
        Ok(review)
    }

    /// The caller's reviews, newest first. Empty is not an error.
    pub fn list_mine(&self, caller: &str) -> Result<Vec<Review>, ServiceError> {
        let caller = require_caller(caller)?;
        Ok(self.store.list_by_owner(caller)?)
    }

    /// Every review from every user, newest first.
    pub fn list_all(&self) -> Result<Vec<Review>, ServiceError> {
        Ok(self.store.list_all()?)
    }

    pub fn get(&self, caller: &str, id: ReviewId) -> Result<Review, ServiceError> {
        self.owned(caller, id)
    }

    /// Apply a partial edit. New text is re-scored; a rating-only edit keeps
    /// the stored sentiment.
    pub fn update(
        &self,
        caller: &str,
        id: ReviewId,
        patch: ReviewPatch,
    ) -> Result<Review, ServiceError> {
        let mut review = self.owned(caller, id)?;
        let patch = patch.validate()?;

        if let Some(name) = patch.product_name {
            review.product_name = name;
        }
        if let Some(text) = patch.review_text {
            let sentiment = self.scorer.classify(&text);
            review.review_text = text;
            review.sentiment = sentiment.label;
            review.score = sentiment.score;
        }
        if let Some(rating) = patch.rating {
            review.rating = rating as u8;
        }
        review.updated_at = now();

        if !self.store.update(&review)? {
            return Err(ServiceError::NotFound);
        }
        info!(id = %review.id, user_id = %review.user_id, "updated review");
        Ok(review)
    }

    pub fn delete(&self, caller: &str, id: ReviewId) -> Result<(), ServiceError> {
        let review = self.owned(caller, id)?;
        if !self.store.delete(review.id)? {
            return Err(ServiceError::NotFound);
        }
        info!(id = %review.id, user_id = %review.user_id, "deleted review");
        Ok(())
    }

    /// Per-label statistics over the caller's reviews.
    pub fn sentiment_stats(&self, caller: &str) -> Result<SentimentStats, ServiceError> {
        let caller = require_caller(caller)?;
        let records = self.store.scored_for_owner(caller)?;
        let stats = aggregate(&records);
        debug!(
            user_id = %caller,
            total = stats.total_count,
            buckets = stats.buckets.len(),
            "aggregated sentiment"
        );
        Ok(stats)
    }

    /// Fetch a review and check that `caller` owns it.
    fn owned(&self, caller: &str, id: ReviewId) -> Result<Review, ServiceError> {
        let caller = require_caller(caller)?;
        let review = self.store.get(id)?.ok_or(ServiceError::NotFound)?;
        if review.user_id != caller {
            return Err(ServiceError::Forbidden);
        }
        Ok(review)
    }
}

fn require_caller(caller: &str) -> Result<&str, ServiceError> {
    let caller = caller.trim();
    if caller.is_empty() {
        return Err(ServiceError::Unauthenticated);
    }
    Ok(caller)
}

/// Current time as a fixed-width RFC 3339 string, so string order is time order.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use revsent_core::SentimentLabel;

    fn service() -> ReviewService<MemoryStore> {
        ReviewService::new(MemoryStore::new(), Scorer::default())
    }

    fn input(text: &str, rating: i64) -> NewReview {
        NewReview {
            product_name: "Kettle".into(),
            review_text: text.into(),
            rating,
        }
    }

    #[test]
    fn create_scores_text() {
        let svc = service();
        let review = svc
            .create("alice", input("This product is great and amazing", 5))
            .unwrap();
        assert_eq!(review.user_id, "alice");
        assert_eq!(review.sentiment, SentimentLabel::Positive);
        assert_eq!(review.score, 1.0);
        assert_eq!(review.created_at, review.updated_at);
    }

    #[test]
    fn create_requires_caller() {
        let svc = service();
        let err = svc.create("  ", input("This product is great", 5)).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn create_validation_errors_are_400() {
        let svc = service();
        let err = svc.create("alice", input("too short", 5)).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Review text must be at least 10 characters");

        let err = svc.create("alice", input("long enough text", 0)).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Rating must be between 1 and 5");

        assert!(svc.store().is_empty().unwrap());
    }

    #[test]
    fn status_codes() {
        assert_eq!(ServiceError::NotFound.status_code(), 404);
        assert_eq!(ServiceError::Forbidden.status_code(), 403);
        let store_err = ServiceError::Store(StoreError::Poisoned);
        assert_eq!(store_err.status_code(), 500);
        assert_eq!(store_err.public_message(), "Internal server error");
    }

    #[test]
    fn text_edit_rescores() {
        let svc = service();
        let review = svc
            .create("alice", input("This product is great and amazing", 5))
            .unwrap();
        let patch = ReviewPatch {
            review_text: Some("Turned out terrible and awful".into()),
            ..Default::default()
        };
        let updated = svc.update("alice", review.id, patch).unwrap();
        assert_eq!(updated.sentiment, SentimentLabel::Negative);
        assert_eq!(updated.score, -1.0);
        assert_eq!(updated.rating, 5);
        assert_eq!(svc.get("alice", review.id).unwrap(), updated);
    }

    #[test]
    fn rating_edit_keeps_sentiment() {
        let svc = service();
        let review = svc
            .create("alice", input("A good kettle for the price", 5))
            .unwrap();
        let patch = ReviewPatch {
            rating: Some(2),
            ..Default::default()
        };
        let updated = svc.update("alice", review.id, patch).unwrap();
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.sentiment, review.sentiment);
        assert_eq!(updated.score, review.score);
        assert_eq!(updated.review_text, review.review_text);
    }

    #[test]
    fn ownership_enforced() {
        let svc = service();
        let review = svc
            .create("alice", input("A good kettle for the price", 5))
            .unwrap();

        assert!(matches!(
            svc.get("bob", review.id),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            svc.update("bob", review.id, ReviewPatch::default()),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            svc.delete("bob", review.id),
            Err(ServiceError::Forbidden)
        ));
        assert!(svc.get("alice", review.id).is_ok());
    }

    #[test]
    fn missing_review_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.get("alice", ReviewId(42)),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            svc.delete("alice", ReviewId(42)),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn ownership_checked_before_validation() {
        let svc = service();
        let review = svc
            .create("alice", input("A good kettle for the price", 5))
            .unwrap();
        let bad = ReviewPatch {
            rating: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            svc.update("bob", review.id, bad.clone()),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            svc.update("alice", review.id, bad),
            Err(ServiceError::Validation(ValidationError::RatingOutOfRange(10)))
        ));
    }

    #[test]
    fn delete_removes_review() {
        let svc = service();
        let review = svc
            .create("alice", input("A good kettle for the price", 5))
            .unwrap();
        svc.delete("alice", review.id).unwrap();
        assert!(matches!(
            svc.get("alice", review.id),
            Err(ServiceError::NotFound)
        ));
        assert!(svc.list_mine("alice").unwrap().is_empty());
    }

    #[test]
    fn stats_scoped_to_caller() {
        let svc = service();
        svc.create("alice", input("This product is great and amazing", 5)).unwrap();
        svc.create("alice", input("Good enough for daily use", 4)).unwrap();
        svc.create("alice", input("Terrible lid, always leaks", 2)).unwrap();
        svc.create("bob", input("This is a product I bought", 3)).unwrap();

        let stats = svc.sentiment_stats("alice").unwrap();
        assert_eq!(stats.total_count, 3);
        let pos = stats.bucket(SentimentLabel::Positive).unwrap();
        assert_eq!(pos.count, 2);
        assert!((pos.average_rating - 4.5).abs() < 1e-12);
        // great + amazing saturates at 1.0, good alone is 0.6.
        assert!((pos.average_score - 0.8).abs() < 1e-12);
        let neg = stats.bucket(SentimentLabel::Negative).unwrap();
        assert_eq!(neg.count, 1);
        assert!(stats.bucket(SentimentLabel::Neutral).is_none());

        let bob = svc.sentiment_stats("bob").unwrap();
        assert_eq!(bob.total_count, 1);
        assert_eq!(bob.buckets[0].label, SentimentLabel::Neutral);

        let nobody = svc.sentiment_stats("carol").unwrap();
        assert_eq!(nobody.total_count, 0);
        assert!(nobody.buckets.is_empty());
    }

    #[test]
    fn list_all_spans_owners() {
        let svc = service();
        svc.create("alice", input("A good kettle for the price", 5)).unwrap();
        svc.create("bob", input("This is a product I bought", 3)).unwrap();
        assert_eq!(svc.list_all().unwrap().len(), 2);
        assert_eq!(svc.list_mine("bob").unwrap().len(), 1);
    }
}
