//! In-memory review store, used by tests and `--in-memory` runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use revsent_core::{Review, ReviewId};
use tracing::debug;

use crate::StoreError;
use crate::store::{NewRecord, ReviewStore, newest_first};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    reviews: BTreeMap<ReviewId, Review>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.reviews.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ReviewStore for MemoryStore {
    fn insert(&self, record: NewRecord) -> Result<Review, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.last_id += 1;
        let review = Review {
            id: ReviewId(inner.last_id),
            user_id: record.user_id,
            product_name: record.product_name,
            review_text: record.review_text,
            rating: record.rating,
            sentiment: record.sentiment.label,
            score: record.sentiment.score,
            updated_at: record.created_at.clone(),
            created_at: record.created_at,
        };
        inner.reviews.insert(review.id, review.clone());
        debug!(id = %review.id, "inserted review");
        Ok(review)
    }

    fn get(&self, id: ReviewId) -> Result<Option<Review>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.reviews.get(&id).cloned())
    }

    fn update(&self, review: &Review) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match inner.reviews.get_mut(&review.id) {
            Some(existing) => {
                existing.product_name.clone_from(&review.product_name);
                existing.review_text.clone_from(&review.review_text);
                existing.rating = review.rating;
                existing.sentiment = review.sentiment;
                existing.score = review.score;
                existing.updated_at.clone_from(&review.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: ReviewId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.reviews.remove(&id).is_some())
    }

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut reviews: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut reviews);
        Ok(reviews)
    }

    fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut reviews: Vec<Review> = inner.reviews.values().cloned().collect();
        newest_first(&mut reviews);
        Ok(reviews)
    }
}
