//! Error types for document transformation.

use crate::fields::MultiValuedField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    /// A name showed up that the id tables were not built with.
    ///
    /// Happens when the tables were built over a different subset of
    /// rows than the one being transformed.
    #[error("No id for {field} entry '{name}'; category tables must cover every row")]
    UnmappedName {
        field: MultiValuedField,
        name: String,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
