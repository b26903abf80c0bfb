//! DuckDB storage for review records.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use duckdb::{Connection, params};
use revsent_core::{InvalidInputError, Review, ReviewId, SentimentLabel};
use tracing::{debug, info};

use crate::StoreError;
use crate::store::{NewRecord, ReviewStore};

/// Table and sequence DDL. CHECK constraints mirror the domain rules so rows
/// written outside this crate still have to respect them.
const SCHEMA: &str = "
CREATE SEQUENCE IF NOT EXISTS review_id_seq START 1;
CREATE TABLE IF NOT EXISTS reviews (
    id BIGINT PRIMARY KEY,
    user_id VARCHAR NOT NULL,
    product_name VARCHAR NOT NULL,
    review_text VARCHAR NOT NULL,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    sentiment VARCHAR NOT NULL CHECK (sentiment IN ('Positive', 'Negative', 'Neutral')),
    score DOUBLE NOT NULL CHECK (score BETWEEN -1 AND 1),
    created_at VARCHAR NOT NULL,
    updated_at VARCHAR NOT NULL
);
";

const COLUMNS: &str =
    "id, user_id, product_name, review_text, rating, sentiment, score, created_at, updated_at";

/// DuckDB-backed [`ReviewStore`].
///
/// Supports both in-memory (ephemeral) and persistent (file-backed) modes.
/// Use [`open`](Self::open) for in-memory and [`open_persistent`](Self::open_persistent)
/// for a database that survives across process restarts. The `reviews` table
/// is created on open if missing.
pub struct DuckStore {
    conn: Connection,
}

impl DuckStore {
    /// Open an in-memory DuckDB database.
    pub fn open() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Open or create a persistent DuckDB database at the given path.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        let store = Self::init(Connection::open(path)?)?;
        info!(path = %path.display(), count = store.count()?, "opened review store");
        Ok(store)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Number of rows in the `reviews` table.
    pub fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT count(*) FROM reviews", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn select(&self, where_clause: &str, param: Option<&str>) -> Result<Vec<Review>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM reviews {where_clause} ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows: Vec<ReviewRow> = match param {
            Some(p) => stmt.query_map([p], ReviewRow::read)?.collect::<Result<_, _>>()?,
            None => stmt.query_map([], ReviewRow::read)?.collect::<Result<_, _>>()?,
        };
        rows.into_iter().map(ReviewRow::into_review).collect()
    }

    // ── Escape hatch ──

    /// Execute arbitrary SQL and return Arrow RecordBatches.
    pub fn query_arrow(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }

    /// Access the underlying DuckDB connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReviewStore for DuckStore {
    fn insert(&self, record: NewRecord) -> Result<Review, StoreError> {
        let id: i64 = self
            .conn
            .query_row("SELECT nextval('review_id_seq')", [], |row| row.get(0))?;
        self.conn.execute(
            &format!("INSERT INTO reviews ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"),
            params![
                id,
                record.user_id,
                record.product_name,
                record.review_text,
                i32::from(record.rating),
                record.sentiment.label.as_str(),
                record.sentiment.score,
                record.created_at,
                record.created_at,
            ],
        )?;
        debug!(id, "inserted review");

        Ok(Review {
            id: ReviewId(id),
            user_id: record.user_id,
            product_name: record.product_name,
            review_text: record.review_text,
            rating: record.rating,
            sentiment: record.sentiment.label,
            score: record.sentiment.score,
            updated_at: record.created_at.clone(),
            created_at: record.created_at,
        })
    }

    fn get(&self, id: ReviewId) -> Result<Option<Review>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM reviews WHERE id = ?"))?;
        let rows: Vec<ReviewRow> = stmt
            .query_map([id.0], ReviewRow::read)?
            .collect::<Result<_, _>>()?;
        rows.into_iter().next().map(ReviewRow::into_review).transpose()
    }

    fn update(&self, review: &Review) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET product_name = ?, review_text = ?, rating = ?, sentiment = ?, score = ?, updated_at = ?
             WHERE id = ?",
            params![
                review.product_name,
                review.review_text,
                i32::from(review.rating),
                review.sentiment.as_str(),
                review.score,
                review.updated_at,
                review.id.0,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: ReviewId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?", [id.0])?;
        Ok(changed > 0)
    }

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        self.select("WHERE user_id = ?", Some(user_id))
    }

    fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        self.select("", None)
    }
}

/// Raw column values of one `reviews` row.
struct ReviewRow {
    id: i64,
    user_id: String,
    product_name: String,
    review_text: String,
    rating: i32,
    sentiment: String,
    score: f64,
    created_at: String,
    updated_at: String,
}

impl ReviewRow {
    fn read(row: &duckdb::Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            product_name: row.get(2)?,
            review_text: row.get(3)?,
            rating: row.get(4)?,
            sentiment: row.get(5)?,
            score: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    /// Decode into a [`Review`], rejecting rows that break the sentiment invariants.
    fn into_review(self) -> Result<Review, StoreError> {
        let rating =
            u8::try_from(self.rating).map_err(|_| InvalidInputError::Rating(self.rating.into()))?;
        let sentiment: SentimentLabel = self.sentiment.parse()?;
        let review = Review {
            id: ReviewId(self.id),
            user_id: self.user_id,
            product_name: self.product_name,
            review_text: self.review_text,
            rating,
            sentiment,
            score: self.score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        review.to_scored()?;
        Ok(review)
    }
}
