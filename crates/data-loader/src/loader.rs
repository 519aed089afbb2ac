//! Whole-file and chunked loading of the cleaned dataset.
//!
//! Both modes share one code path: `MovieChunks` reads fixed-size batches
//! of raw rows, cleans each batch and stops once the row cap is reached.
//! `load_movies` just drains it into one vector.

use crate::cleaning::CleaningPipeline;
use crate::error::{DataLoadError, Result};
use crate::parser::{self, RawMovieRecords};
use crate::types::Movie;
use std::path::PathBuf;
use tracing::{debug, info};

/// Rows per batch unless configured otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Where to read from and how much to keep.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Path to `TMDB_movie_dataset.csv`
    pub path: PathBuf,
    /// Maximum number of cleaned rows to produce; `None` means all of them
    pub row_limit: Option<usize>,
    /// Raw rows read per batch
    pub chunk_size: usize,
    /// Also drop rows without a valid IMDB id
    pub require_imdb_id: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(parser::DATASET_FILE_NAME),
            row_limit: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            require_imdb_id: false,
        }
    }
}

impl LoaderConfig {
    /// Cap the number of cleaned rows; `0` means unbounded
    pub fn with_row_limit(mut self, rows: usize) -> Self {
        self.row_limit = (rows != 0).then_some(rows);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_require_imdb_id(mut self, require: bool) -> Self {
        self.require_imdb_id = require;
        self
    }
}

/// Lazy sequence of cleaned batches.
///
/// Yields at most `row_limit` movies in total; the batch that crosses the
/// limit is truncated to exactly the remaining quota and nothing follows
/// it. Batches that clean down to nothing are skipped rather than yielded
/// empty. Only one batch is resident at a time.
pub struct MovieChunks {
    records: RawMovieRecords,
    cleaning: CleaningPipeline,
    chunk_size: usize,
    remaining: Option<usize>,
    rows_read: usize,
    emitted: usize,
    finished: bool,
}

impl MovieChunks {
    /// Open the dataset described by `config`.
    pub fn open(config: &LoaderConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(DataLoadError::InvalidValue {
                field: "chunk_size".to_string(),
                value: config.chunk_size.to_string(),
            });
        }

        let records = parser::open_dataset(&config.path)?;
        info!("Reading movies from {}", config.path.display());

        Ok(Self {
            records,
            cleaning: CleaningPipeline::standard(config.require_imdb_id),
            chunk_size: config.chunk_size,
            remaining: config.row_limit,
            rows_read: 0,
            emitted: 0,
            finished: false,
        })
    }

    /// Raw rows consumed from the file so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Cleaned rows handed out so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for MovieChunks {
    type Item = Result<Vec<Movie>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished || self.remaining == Some(0) {
                return None;
            }

            let mut raw = Vec::with_capacity(self.chunk_size);
            for record in self.records.by_ref().take(self.chunk_size) {
                match record {
                    Ok(row) => raw.push(row),
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(e.into()));
                    }
                }
            }
            if raw.len() < self.chunk_size {
                self.finished = true;
            }
            if raw.is_empty() {
                return None;
            }

            self.rows_read += raw.len();
            let read = raw.len();
            let mut movies = self.cleaning.clean(raw);
            if let Some(remaining) = self.remaining.as_mut() {
                movies.truncate(*remaining);
                *remaining -= movies.len();
            }
            debug!("Cleaned chunk: kept {} of {} rows", movies.len(), read);

            if movies.is_empty() {
                continue;
            }
            self.emitted += movies.len();
            return Some(Ok(movies));
        }
    }
}

/// Load the whole (capped) dataset into memory.
pub fn load_movies(config: &LoaderConfig) -> Result<Vec<Movie>> {
    let mut chunks = MovieChunks::open(config)?;
    let mut movies = Vec::new();
    for chunk in chunks.by_ref() {
        movies.extend(chunk?);
    }

    info!(
        "Done reading CSV: kept {} of {} rows",
        movies.len(),
        chunks.rows_read()
    );
    Ok(movies)
}
