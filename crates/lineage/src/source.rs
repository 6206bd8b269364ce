//! Tree sources
//!
//! A [`TreeSource`] supplies the person list for one tree load. The engine
//! never retries a failed fetch; failures are handed back to the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LineageError, Result};
use crate::person::{parse_persons, validate_unique_ids, PersonRecord};

/// Provider of family-tree person lists.
pub trait TreeSource {
    /// Short name used in error messages and logs.
    fn name(&self) -> &str;

    /// Fetch a fresh person list.
    fn fetch_tree(&self) -> Result<Vec<PersonRecord>>;
}

/// A fixed, in-memory person list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    persons: Vec<PersonRecord>,
}

impl StaticSource {
    /// Wrap a person list.
    pub fn new(persons: Vec<PersonRecord>) -> Self {
        Self { persons }
    }
}

impl TreeSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_tree(&self) -> Result<Vec<PersonRecord>> {
        validate_unique_ids(&self.persons)?;
        Ok(self.persons.clone())
    }
}

/// Reads the provider's JSON from a file on every fetch.
///
/// The file may hold a bare array of records or `{"tree": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    /// Source backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_tree(&self) -> Result<Vec<PersonRecord>> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| LineageError::source_failed(&self.name, e.to_string()))?;
        let persons = parse_persons(&text)?;
        debug!(source = %self.name, persons = persons.len(), "fetched tree");
        Ok(persons)
    }
}

impl fmt::Display for JsonFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
