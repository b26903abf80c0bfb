use revsent_core::InvalidInputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "duckdb")]
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[error("invalid stored review: {0}")]
    InvalidRecord(#[from] InvalidInputError),

    #[error("review store lock poisoned")]
    Poisoned,
}
