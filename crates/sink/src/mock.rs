//! Mock fixture writer.
//!
//! Produces `mock_movies.json` plus one `mock_<field>.json` per
//! multi-valued field, pretty-printed with four-space indentation.

use crate::error::Result;
use data_loader::Movie;
use pipeline::{CategoryIndex, MultiValuedField, Transformer};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const MOVIES_FILE_NAME: &str = "mock_movies.json";

/// Files written by one mock run
#[derive(Debug, Clone, PartialEq)]
pub struct MockSummary {
    pub movies_path: PathBuf,
    pub fixture_paths: Vec<PathBuf>,
    pub documents: usize,
}

/// Writes fixtures into one directory, overwriting earlier runs
#[derive(Debug, Clone)]
pub struct MockSink {
    output_dir: PathBuf,
}

impl MockSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn movies_path(&self) -> PathBuf {
        self.output_dir.join(MOVIES_FILE_NAME)
    }

    pub fn fixture_path(&self, field: MultiValuedField) -> PathBuf {
        self.output_dir.join(format!("mock_{}.json", field.column()))
    }

    /// Write the category fixtures and the documents.
    ///
    /// Every document is transformed before anything is written, so a
    /// transformation error leaves earlier fixtures untouched.
    pub fn write(
        &self,
        movies: &[Movie],
        index: &CategoryIndex,
        transformer: Transformer<'_>,
    ) -> Result<MockSummary> {
        let documents = transformer.transform_all(movies)?;
        fs::create_dir_all(&self.output_dir)?;

        let mut fixture_paths = Vec::with_capacity(MultiValuedField::ALL.len());
        for field in MultiValuedField::ALL {
            let path = self.fixture_path(field);
            write_json(&path, &index.table(field).categories())?;
            info!("Data written to {}", path.display());
            fixture_paths.push(path);
        }

        let movies_path = self.movies_path();
        write_json(&movies_path, &documents)?;
        info!(
            "Data written to {} ({} movies)",
            movies_path.display(),
            documents.len()
        );

        Ok(MockSummary {
            movies_path,
            fixture_paths,
            documents: documents.len(),
        })
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}
