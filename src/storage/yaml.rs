//! YAML Backend
//!
//! Mirrors the table to a single YAML file, rewritten wholesale on save.
//!
//! Writes go straight to the target path; a crash mid-write can leave a
//! truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RepoError, Result};
use crate::row::{self, Row, Table, Value};

use super::Persistence;

/// File-backed persistence using YAML
#[derive(Debug, Clone)]
pub struct YamlBackend {
    /// File to save/load
    path: PathBuf,
}

impl YamlBackend {
    /// Create a backend for `path` (the file need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a YAML document into a table
    ///
    /// An empty or null document is an empty table. String ids are kept
    /// verbatim; field names are normalized through `row::normalize_key`.
    /// Keys that collide after conversion are a `Serialization` error.
    pub fn parse(text: &str) -> Result<Table> {
        if text.trim().is_empty() {
            return Ok(Table::new());
        }

        let document: Value = serde_yaml::from_str(text)?;
        let mapping = match document {
            Value::Null => return Ok(Table::new()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(RepoError::Serialization(format!(
                    "expected a mapping of id to row, got {}",
                    row::kind_of(&other)
                )))
            }
        };

        let mut table = Table::new();
        for (key, value) in mapping {
            let id = row::id_key(&key).ok_or_else(|| {
                RepoError::Serialization(format!("unsupported id key: {}", row::kind_of(&key)))
            })?;
            if table.contains_key(&id) {
                return Err(RepoError::Serialization(format!("duplicate id: {}", id)));
            }
            let fields = match value {
                Value::Mapping(fields) => row::mapping_to_row(fields)?,
                Value::Null => Default::default(),
                other => {
                    return Err(RepoError::Serialization(format!(
                        "row {} is a {}, expected a mapping",
                        id,
                        row::kind_of(&other)
                    )))
                }
            };
            table.insert(id, fields);
        }
        Ok(table)
    }
}

impl Persistence for YamlBackend {
    fn load(&mut self) -> Result<Option<Table>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)?;
        let table = Self::parse(&text)?;
        info!(path = %self.path.display(), rows = table.len(), "loaded YAML table");
        Ok(Some(table))
    }

    fn save(&mut self, data: &Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        for row in data.values() {
            self.validate_row(row)?;
        }

        let text = serde_yaml::to_string(data)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), rows = data.len(), "saved YAML table");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("yaml:{}", self.path.display())
    }

    /// Field names starting with `:` would lose the prefix on reload
    fn validate_row(&self, row: &Row) -> Result<()> {
        match row.keys().find(|field| field.starts_with(':')) {
            Some(field) => Err(RepoError::Serialization(format!(
                "field name {} cannot start with ':'",
                field
            ))),
            None => Ok(()),
        }
    }
}
