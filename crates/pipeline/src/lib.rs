//! Transformation of cleaned movie rows into normalized documents.
//!
//! This crate provides:
//! - MultiValuedField and the rules for splitting joined cells
//! - CategoryIndex, the name -> id tables for those fields
//! - MovieDocument, the unit written to fixtures and collections
//! - Transformer, which maps one cleaned row to one document
//!
//! ## Architecture
//! Rows flow through in two steps:
//! 1. (tagged mode only) CategoryIndex is built over every row first
//! 2. Transformer converts each row, looking names up in the finished tables
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{CategoryIndex, Transformer};
//!
//! let index = CategoryIndex::build(&movies);
//! let documents = Transformer::tagged(&index).transform_all(&movies)?;
//! ```

pub mod categories;
pub mod document;
pub mod error;
pub mod fields;
pub mod transform;

pub use categories::{CategoryIndex, CategoryTable};
pub use document::{Category, CategoryEntry, MovieDocument};
pub use error::{Result, TransformError};
pub use fields::{split_names, MultiValuedField, SEPARATOR};
pub use transform::{EntryMode, Transformer};
