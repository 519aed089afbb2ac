//! Error types for the data-loader crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and cleaning the movie dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The dataset is not where the loader expects it
    ///
    /// The message names the download location so the operator knows
    /// where to fetch the export from.
    #[error(
        "{} not found. Download it from {url} and unzip it in the working directory with the correct filename.",
        .path.display()
    )]
    MissingSourceFile { path: PathBuf, url: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected a record (bad quoting, wrong field count, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A loader setting had an unusable value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
