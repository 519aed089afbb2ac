//! # Data Loader Crate
//!
//! This crate reads and cleans the TMDB movie export (`TMDB_movie_dataset.csv`).
//!
//! ## Main Components
//!
//! - **types**: Raw and cleaned row types (RawMovie, Movie)
//! - **parser**: Open the CSV export and parse its awkward columns
//! - **filters**: Row-level cleaning steps (required fields, adult, duplicates)
//! - **cleaning**: The CleaningPipeline that chains those steps
//! - **loader**: Whole-file and chunked loading with a row cap
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{LoaderConfig, MovieChunks};
//!
//! let config = LoaderConfig::default().with_row_limit(5000);
//! for chunk in MovieChunks::open(&config)? {
//!     let movies = chunk?;
//!     println!("{} cleaned movies in this batch", movies.len());
//! }
//! ```

// Public modules
pub mod cleaning;
pub mod error;
pub mod filters;
pub mod loader;
pub mod parser;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use cleaning::CleaningPipeline;
pub use error::{DataLoadError, Result};
pub use loader::{load_movies, LoaderConfig, MovieChunks, DEFAULT_CHUNK_SIZE};
pub use parser::{DATASET_FILE_NAME, DOWNLOAD_DATA_URL};
pub use traits::RowFilter;
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    Movie,
    RawMovie,
};
