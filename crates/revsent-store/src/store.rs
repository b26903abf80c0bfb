use revsent_core::{Review, ReviewId, ScoredReview, Sentiment};

use crate::StoreError;

/// A review ready to persist: validated input plus its scored sentiment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub user_id: String,
    pub product_name: String,
    pub review_text: String,
    pub rating: u8,
    pub sentiment: Sentiment,
    /// Used for both `created_at` and `updated_at`.
    pub created_at: String,
}

/// Review persistence keyed by id and scoped by owner.
///
/// Listing methods return newest first (`created_at` descending, then id
/// descending). Ownership checks are the caller's job.
pub trait ReviewStore {
    /// Assign an id and persist.
    fn insert(&self, record: NewRecord) -> Result<Review, StoreError>;

    fn get(&self, id: ReviewId) -> Result<Option<Review>, StoreError>;

    /// Overwrite the mutable fields of an existing review. Returns `false` if
    /// no review has that id.
    fn update(&self, review: &Review) -> Result<bool, StoreError>;

    /// Returns `false` if no review has that id.
    fn delete(&self, id: ReviewId) -> Result<bool, StoreError>;

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Review>, StoreError>;

    fn list_all(&self) -> Result<Vec<Review>, StoreError>;

    /// Every review of `user_id` in the aggregator's shape.
    fn scored_for_owner(&self, user_id: &str) -> Result<Vec<ScoredReview>, StoreError> {
        self.list_by_owner(user_id)?
            .iter()
            .map(|r| r.to_scored().map_err(StoreError::from))
            .collect()
    }
}

impl<S: ReviewStore + ?Sized> ReviewStore for Box<S> {
    fn insert(&self, record: NewRecord) -> Result<Review, StoreError> {
        (**self).insert(record)
    }

    fn get(&self, id: ReviewId) -> Result<Option<Review>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, review: &Review) -> Result<bool, StoreError> {
        (**self).update(review)
    }

    fn delete(&self, id: ReviewId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        (**self).list_by_owner(user_id)
    }

    fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        (**self).list_all()
    }

    fn scored_for_owner(&self, user_id: &str) -> Result<Vec<ScoredReview>, StoreError> {
        (**self).scored_for_owner(user_id)
    }
}

/// Sort newest first.
pub(crate) fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
