//! Storage seam for the database sink.
//!
//! `DatabaseSink` only talks to a `MovieStore`, so the load/trim/index
//! sequence can run against MongoDB in production and against an
//! in-memory store in tests.

use crate::error::Result;
use async_trait::async_trait;
use pipeline::MovieDocument;

/// Secondary indexes on the movie collection, all ascending
pub const MOVIE_INDEX_FIELDS: [&str; 7] = [
    "release_date",
    "runtime",
    "vote_average",
    "status",
    "genres",
    "spoken_languages",
    "decade",
];

/// Indexes on the review collection; its documents are written elsewhere
pub const REVIEW_INDEX_FIELDS: [&str; 2] = ["username", "date"];

/// Result of one unordered batch insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: u64,
    /// Documents rejected because their `_id` already existed
    pub skipped: u64,
}

/// The operations the database sink needs from a document store.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Number of documents currently in the movie collection
    async fn count_movies(&self) -> Result<u64>;

    /// Insert a batch without ordering guarantees.
    ///
    /// Documents the server rejects one by one (duplicate keys included)
    /// are counted in `skipped` and do not stop the remaining documents; a
    /// failure of the batch as a whole is an error.
    async fn insert_batch(&self, documents: &[MovieDocument]) -> Result<BatchOutcome>;

    /// Descending index on `popularity`
    async fn create_popularity_index(&self) -> Result<()>;

    /// Popularity of the movie at 0-based `offset` in descending order,
    /// `None` if the collection has no movie at that offset
    async fn popularity_at_offset(&self, offset: u64) -> Result<Option<f64>>;

    /// Delete movies whose popularity is strictly below `threshold`,
    /// returning how many were removed
    async fn delete_below_popularity(&self, threshold: f64) -> Result<u64>;

    /// Ascending single-field indexes on the movie collection
    async fn create_movie_indexes(&self, fields: &[&str]) -> Result<()>;

    /// Ascending single-field indexes on the review collection
    async fn create_review_indexes(&self, fields: &[&str]) -> Result<()>;
}
