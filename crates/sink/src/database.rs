//! # Database Sink
//!
//! Loads movie documents into the movie collection in one pass:
//! 1. Refuse to start unless the collection is empty
//! 2. Insert every chunk as an unordered batch
//! 3. Build the popularity index and trim below the configured rank
//! 4. Build the secondary indexes on movies and reviews
//!
//! Steps 3 and 4 run exactly once, after the last batch.

use crate::config::DbConfig;
use crate::error::{Result, SinkError};
use crate::store::{MovieStore, MOVIE_INDEX_FIELDS, REVIEW_INDEX_FIELDS};
use data_loader::Movie;
use indicatif::ProgressBar;
use pipeline::Transformer;
use std::time::Instant;
use tracing::{info, warn};

/// What a completed load did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillSummary {
    /// Cleaned rows handed to the sink
    pub processed: u64,
    pub inserted: u64,
    /// Rows rejected as duplicate keys
    pub skipped: u64,
    /// Popularity at the cutoff rank, if the collection reached it
    pub threshold: Option<f64>,
    /// Documents removed by the popularity trim
    pub trimmed: u64,
}

/// Streams batches into a `MovieStore`.
pub struct DatabaseSink<S> {
    store: S,
    collection: String,
    popularity_rank: u64,
    progress: ProgressBar,
}

impl<S: MovieStore> DatabaseSink<S> {
    pub fn new(store: S, config: &DbConfig) -> Self {
        Self {
            store,
            collection: config.movies_collection.clone(),
            popularity_rank: config.popularity_rank,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report processed rows on `progress` instead of a hidden bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rows processed so far; only ever grows
    pub fn processed(&self) -> u64 {
        self.progress.position()
    }

    /// Fail with `CollectionNotEmpty` if the movie collection has data
    pub async fn ensure_empty(&self) -> Result<()> {
        let count = self.store.count_movies().await?;
        if count > 0 {
            warn!(
                "Collection {} already has {} documents, nothing loaded",
                self.collection, count
            );
            return Err(SinkError::CollectionNotEmpty {
                collection: self.collection.clone(),
                count,
            });
        }
        Ok(())
    }

    /// Run the whole load.
    ///
    /// # Arguments
    /// * `chunks` - Cleaned batches, typically a `MovieChunks`
    /// * `transformer` - Converts each row; its tables must already cover
    ///   every row in `chunks`
    pub async fn fill<I>(&self, chunks: I, transformer: Transformer<'_>) -> Result<FillSummary>
    where
        I: IntoIterator<Item = data_loader::Result<Vec<Movie>>>,
    {
        self.ensure_empty().await?;

        let start_time = Instant::now();
        let mut summary = FillSummary::default();

        for chunk in chunks {
            let movies = chunk?;
            let documents = transformer.transform_all(&movies)?;
            let outcome = self.store.insert_batch(&documents).await?;
            if outcome.skipped > 0 {
                warn!("Skipped {} documents with duplicate ids", outcome.skipped);
            }

            summary.inserted += outcome.inserted;
            summary.skipped += outcome.skipped;
            summary.processed += movies.len() as u64;
            self.progress.inc(movies.len() as u64);
        }
        self.progress.finish();
        info!(
            "Inserted {} movies ({} skipped) in {:?}",
            summary.inserted,
            summary.skipped,
            start_time.elapsed()
        );

        let (threshold, trimmed) = self.trim_to_popularity_rank().await?;
        summary.threshold = threshold;
        summary.trimmed = trimmed;

        self.create_secondary_indexes().await?;
        Ok(summary)
    }

    async fn trim_to_popularity_rank(&self) -> Result<(Option<f64>, u64)> {
        self.store.create_popularity_index().await?;

        let offset = self.popularity_rank.saturating_sub(1);
        let Some(threshold) = self.store.popularity_at_offset(offset).await? else {
            info!(
                "Fewer than {} movies with a popularity, nothing trimmed",
                self.popularity_rank
            );
            return Ok((None, 0));
        };

        let trimmed = self.store.delete_below_popularity(threshold).await?;
        info!(
            "Removed {} movies with popularity below {} (rank {})",
            trimmed, threshold, self.popularity_rank
        );
        Ok((Some(threshold), trimmed))
    }

    async fn create_secondary_indexes(&self) -> Result<()> {
        self.store.create_movie_indexes(&MOVIE_INDEX_FIELDS).await?;
        self.store.create_review_indexes(&REVIEW_INDEX_FIELDS).await?;
        info!(
            "Created indexes on {} and {}",
            MOVIE_INDEX_FIELDS.join(", "),
            REVIEW_INDEX_FIELDS.join(", ")
        );
        Ok(())
    }
}
