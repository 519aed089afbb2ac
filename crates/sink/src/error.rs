//! Error types for the sinks.

use data_loader::DataLoadError;
use pipeline::TransformError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    /// The target collection already holds data.
    ///
    /// Loading only ever starts from an empty collection; drop it first.
    #[error("Collection '{collection}' already has {count} documents. First drop all data.")]
    CollectionNotEmpty { collection: String, count: u64 },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON encoding error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// An environment setting could not be parsed
    #[error("Invalid value for {key}: {value}")]
    Config { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, SinkError>;
