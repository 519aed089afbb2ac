//! Cleaning steps for raw dataset rows.
//!
//! These are composed into a `CleaningPipeline`, in this order:
//! required fields, adult flag, duplicate ids.

pub mod adult;
pub mod duplicate_id;
pub mod required_fields;

// Re-export for convenience
pub use adult::AdultFilter;
pub use duplicate_id::DuplicateIdFilter;
pub use required_fields::RequiredFieldsFilter;
