//! Parser for the TMDB CSV export.
//!
//! The heavy lifting (quoting, escaping, header matching) is done by the
//! `csv` crate. This module only knows where the file lives and how the
//! few awkward columns are spelled:
//! - `adult` is written as `True`/`False` by the export tool
//! - `release_date` is usually `YYYY-MM-DD`, occasionally with a time part
//! - `imdb_id` is `tt` followed by digits when present

use crate::error::{DataLoadError, Result};
use crate::types::RawMovie;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::path::Path;

/// File name the export is distributed under
pub const DATASET_FILE_NAME: &str = "TMDB_movie_dataset.csv";

/// Where to download the export from
pub const DOWNLOAD_DATA_URL: &str =
    "https://www.kaggle.com/datasets/asaniczka/tmdb-movies-dataset-2023-930k-movies";

/// Streaming iterator over the raw rows of the export
pub type RawMovieRecords = csv::DeserializeRecordsIntoIter<File, RawMovie>;

/// Open the dataset and return a lazy iterator over its rows.
///
/// Fails with `MissingSourceFile` before touching anything else when the
/// file does not exist.
pub fn open_dataset(path: &Path) -> Result<RawMovieRecords> {
    if !path.is_file() {
        return Err(DataLoadError::MissingSourceFile {
            path: path.to_path_buf(),
            url: DOWNLOAD_DATA_URL.to_string(),
        });
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    Ok(reader.into_deserialize())
}

/// Parse a release date string.
///
/// Example: "1994-05-01" -> Some(1994-05-01)
///          "1994-05-01 00:00:00" -> Some(1994-05-01)
///          "May 1994" -> None
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(t, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(t, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Parse a boolean flag as spelled by spreadsheet-style exports
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// `tt` followed by at least one digit and nothing else
pub fn is_valid_imdb_id(raw: &str) -> bool {
    raw.strip_prefix("tt")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_flag))
}
