//! Sinks for transformed movie documents.
//!
//! - **mock**: JSON fixture files for front-end development and tests
//! - **database**: batched load into MongoDB followed by the popularity
//!   trim and index pass
//! - **store**: the `MovieStore` seam the database sink writes through
//! - **mongo**: the MongoDB `MovieStore`
//! - **config**: environment-driven run configuration

pub mod config;
pub mod database;
pub mod error;
pub mod mock;
pub mod mongo;
pub mod store;

pub use config::{DbConfig, RunConfig};
pub use database::{DatabaseSink, FillSummary};
pub use error::{Result, SinkError};
pub use mock::{MockSink, MockSummary};
pub use mongo::MongoStore;
pub use store::{BatchOutcome, MovieStore, MOVIE_INDEX_FIELDS, REVIEW_INDEX_FIELDS};
