//! Name -> id tables for the multi-valued fields.
//!
//! Ids are assigned in order of first appearance while scanning the
//! rows, which makes them reproducible for the same input. `sorted()`
//! reassigns them alphabetically for ids that are stable across inputs.
//! Tables must be complete before the first document is transformed.

use crate::document::Category;
use crate::fields::{split_names, MultiValuedField};
use data_loader::Movie;
use std::collections::HashMap;
use tracing::debug;

/// Distinct names of one field and their ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    names: Vec<String>,
    ids: HashMap<String, u32>,
}

impl CategoryTable {
    /// Record a name, returning its id (existing or newly assigned)
    pub fn insert(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Names ordered by id
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `{id, name}` records ordered by id
    pub fn categories(&self) -> Vec<Category> {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| Category {
                id: id as u32,
                name: name.clone(),
            })
            .collect()
    }

    /// Reassign ids in alphabetical order of the names
    pub fn sorted(mut self) -> Self {
        self.names.sort();
        self.ids = self
            .names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id as u32))
            .collect();
        self
    }
}

/// One table per multi-valued field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    tables: [CategoryTable; 5],
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tables over every movie in one pass
    pub fn build<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Self {
        let mut index = Self::new();
        for movie in movies {
            index.observe(movie);
        }
        index.log_sizes();
        index
    }

    /// Build the tables from a stream of batches without keeping them.
    ///
    /// Used for a prepass over chunked input; the first error ends the scan.
    pub fn scan<I, E>(chunks: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<Vec<Movie>, E>>,
    {
        let mut index = Self::new();
        for chunk in chunks {
            for movie in &chunk? {
                index.observe(movie);
            }
        }
        index.log_sizes();
        Ok(index)
    }

    /// Add every name found in this movie's multi-valued cells
    pub fn observe(&mut self, movie: &Movie) {
        for field in MultiValuedField::ALL {
            if let Some(cell) = field.cell(movie) {
                let table = &mut self.tables[field.index()];
                for name in split_names(cell) {
                    table.insert(name);
                }
            }
        }
    }

    fn log_sizes(&self) {
        for field in MultiValuedField::ALL {
            debug!("{} distinct {}", self.table(field).len(), field);
        }
    }

    pub fn table(&self, field: MultiValuedField) -> &CategoryTable {
        &self.tables[field.index()]
    }

    /// Reassign all ids alphabetically
    pub fn sorted(self) -> Self {
        Self {
            tables: self.tables.map(CategoryTable::sorted),
        }
    }
}
