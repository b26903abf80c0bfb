//! Storage layer: review records in DuckDB or in memory, plus the review workflow
//! that scores text on the way in and aggregates sentiment on the way out.

mod error;
mod memory;
mod service;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use service::{ReviewService, ServiceError};
pub use store::{NewRecord, ReviewStore};

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckStore;
