//! Run configuration.
//!
//! The command line only carries the mode and the row count; everything
//! else comes from the environment (optionally a `.env` file):
//!
//! | variable              | default                      |
//! |-----------------------|------------------------------|
//! | `MONGO_URL`           | `mongodb://localhost:27017/` |
//! | `MONGO_DB`            | `T26-Project-2`              |
//! | `POPULARITY_RANK`     | `10000`                      |
//! | `MOCK_OUTPUT_DIR`     | `.`                          |
//! | `TAG_CATEGORY_IDS`    | `false`                      |
//! | `SORT_CATEGORY_NAMES` | `false`                      |
//! | `REQUIRE_IMDB_ID`     | `false`                      |

use crate::error::{Result, SinkError};
use pipeline::EntryMode;
use std::path::PathBuf;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "T26-Project-2";
pub const MOVIES_COLLECTION: &str = "movies";
pub const REVIEWS_COLLECTION: &str = "reviews";

/// Only the most popular movies up to this rank are kept
pub const DEFAULT_POPULARITY_RANK: u64 = 10_000;

/// Where and how the database sink writes
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub uri: String,
    pub database: String,
    pub movies_collection: String,
    pub reviews_collection: String,
    /// 1-based rank whose popularity becomes the trim threshold
    pub popularity_rank: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            movies_collection: MOVIES_COLLECTION.to_string(),
            reviews_collection: REVIEWS_COLLECTION.to_string(),
            popularity_rank: DEFAULT_POPULARITY_RANK,
        }
    }
}

/// Everything a run needs besides the two positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory the mock fixtures are written to
    pub output_dir: PathBuf,
    pub entry_mode: EntryMode,
    /// Assign category ids alphabetically instead of by first appearance
    pub sort_category_names: bool,
    pub require_imdb_id: bool,
    pub db: DbConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            entry_mode: EntryMode::Names,
            sort_category_names: false,
            require_imdb_id: false,
            db: DbConfig::default(),
        }
    }
}

impl RunConfig {
    /// Read the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key -> value lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(uri) = lookup("MONGO_URL") {
            config.db.uri = uri;
        }
        if let Some(database) = lookup("MONGO_DB") {
            config.db.database = database;
        }
        if let Some(rank) = lookup("POPULARITY_RANK") {
            config.db.popularity_rank = match rank.trim().parse() {
                Ok(rank) if rank > 0 => rank,
                _ => return Err(invalid("POPULARITY_RANK", &rank)),
            };
        }
        if let Some(dir) = lookup("MOCK_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(tag) = lookup("TAG_CATEGORY_IDS") {
            if parse_switch("TAG_CATEGORY_IDS", &tag)? {
                config.entry_mode = EntryMode::Tagged;
            }
        }
        if let Some(sort) = lookup("SORT_CATEGORY_NAMES") {
            config.sort_category_names = parse_switch("SORT_CATEGORY_NAMES", &sort)?;
        }
        if let Some(strict) = lookup("REQUIRE_IMDB_ID") {
            config.require_imdb_id = parse_switch("REQUIRE_IMDB_ID", &strict)?;
        }

        Ok(config)
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> SinkError {
    SinkError::Config {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, RunConfig::default());
        assert_eq!(config.db.uri, "mongodb://localhost:27017/");
        assert_eq!(config.db.database, "T26-Project-2");
        assert_eq!(config.db.popularity_rank, 10_000);
        assert_eq!(config.entry_mode, EntryMode::Names);
    }

    #[test]
    fn test_overrides() {
        let config = RunConfig::from_lookup(lookup(&[
            ("MONGO_URL", "mongodb://db:27017/"),
            ("MONGO_DB", "movies-test"),
            ("POPULARITY_RANK", "500"),
            ("MOCK_OUTPUT_DIR", "fixtures"),
            ("TAG_CATEGORY_IDS", "true"),
            ("SORT_CATEGORY_NAMES", "1"),
            ("REQUIRE_IMDB_ID", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.db.uri, "mongodb://db:27017/");
        assert_eq!(config.db.database, "movies-test");
        assert_eq!(config.db.popularity_rank, 500);
        assert_eq!(config.output_dir, PathBuf::from("fixtures"));
        assert_eq!(config.entry_mode, EntryMode::Tagged);
        assert!(config.sort_category_names);
        assert!(config.require_imdb_id);
    }

    #[test]
    fn test_invalid_values() {
        let err = RunConfig::from_lookup(lookup(&[("POPULARITY_RANK", "lots")])).unwrap_err();
        assert!(matches!(err, SinkError::Config { ref key, .. } if key == "POPULARITY_RANK"));

        let err = RunConfig::from_lookup(lookup(&[("POPULARITY_RANK", "0")])).unwrap_err();
        assert!(matches!(err, SinkError::Config { .. }));

        let err = RunConfig::from_lookup(lookup(&[("TAG_CATEGORY_IDS", "maybe")])).unwrap_err();
        assert!(matches!(err, SinkError::Config { .. }));
    }
}
