//! Storage
//!
//! Owns the table and routes every change through the backend.

use std::path::PathBuf;

use tracing::{debug, info, trace};

use crate::config::{Config, StorageKind};
use crate::error::{RepoError, Result};
use crate::row::{Row, Table};

use super::{MemoryBackend, Persistence, YamlBackend};

/// An id → row table with guarded mutations
///
/// Every successful mutation is followed by a synchronous save through the
/// backend, so a YAML-backed storage always has the full table on disk.
#[derive(Debug)]
pub struct Storage {
    /// The live table
    data: Table,

    /// Where the table is persisted
    backend: Box<dyn Persistence>,
}

impl Storage {
    /// Create a storage over `backend`, loading whatever it already holds
    pub fn new(backend: impl Persistence + 'static) -> Result<Self> {
        let mut storage = Self {
            data: Table::new(),
            backend: Box::new(backend),
        };
        storage.load()?;
        Ok(storage)
    }

    /// In-memory storage (never fails to open)
    pub fn memory() -> Self {
        Self {
            data: Table::new(),
            backend: Box::new(MemoryBackend),
        }
    }

    /// YAML storage at `path`, loaded at construction if the file exists
    pub fn yaml(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(YamlBackend::new(path))
    }

    /// Open the storage for table `name` as described by `config`
    pub fn open(config: &Config, name: &str) -> Result<Self> {
        config.validate()?;
        if name.is_empty() {
            return Err(RepoError::Config("table name cannot be empty".to_string()));
        }

        let storage = match config.storage {
            StorageKind::Memory => Self::memory(),
            StorageKind::Yaml => Self::yaml(config.table_path(name))?,
        };
        info!(table = name, backend = %storage.describe(), "opened storage");
        Ok(storage)
    }

    // =========================================================================
    // Synchronization and Persistence
    // =========================================================================

    /// Run `op` as one synchronized unit
    ///
    /// Every load, save and mutation goes through here. There is no lock
    /// behind it; callers needing cross-thread access wrap the storage.
    pub fn synchronize<R>(&mut self, op: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        trace!(backend = %self.backend.describe(), "synchronize");
        op(self)
    }

    /// Reload the table from the backend
    ///
    /// Leaves the current table untouched when the backend has nothing.
    pub fn load(&mut self) -> Result<()> {
        self.synchronize(|storage| storage.load_unsynced())
    }

    /// Persist the current table
    pub fn save(&mut self) -> Result<()> {
        self.synchronize(|storage| storage.save_unsynced())
    }

    fn load_unsynced(&mut self) -> Result<()> {
        if let Some(table) = self.backend.load()? {
            self.data = table;
        }
        Ok(())
    }

    fn save_unsynced(&mut self) -> Result<()> {
        self.backend.save(&self.data)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a row by id
    pub fn get(&self, id: &str) -> Option<&Row> {
        self.data.get(id)
    }

    /// Check whether `id` is present
    pub fn exists(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// Read-only view of the whole table
    pub fn data(&self) -> &Table {
        &self.data
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Backend description, e.g. `memory` or `yaml:/path/people.yml`
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a new row
    ///
    /// Fails with `RecordExists` if `id` is already present, or with
    /// `Serialization` if the backend cannot store `row` faithfully.
    pub fn insert(&mut self, id: &str, row: Row) -> Result<()> {
        self.synchronize(|storage| {
            if storage.exists(id) {
                return Err(RepoError::RecordExists { id: id.to_string() });
            }
            storage.backend.validate_row(&row)?;
            storage.data.insert(id.to_string(), row);
            debug!(id, "storage insert");
            storage.save_unsynced()
        })
    }

    /// Replace an existing row
    ///
    /// Fails with `RecordNotFound` if `id` is absent, or with
    /// `Serialization` if the backend cannot store `row` faithfully.
    pub fn update(&mut self, id: &str, row: Row) -> Result<()> {
        self.synchronize(|storage| {
            if storage.exists(id) {
                storage.backend.validate_row(&row)?;
            }
            match storage.data.get_mut(id) {
                Some(existing) => *existing = row,
                None => return Err(RepoError::RecordNotFound { id: id.to_string() }),
            }
            debug!(id, "storage update");
            storage.save_unsynced()
        })
    }

    /// Remove a row, returning it
    ///
    /// Fails with `RecordNotFound` if `id` is absent.
    pub fn delete(&mut self, id: &str) -> Result<Row> {
        self.synchronize(|storage| {
            let row = storage
                .data
                .remove(id)
                .ok_or_else(|| RepoError::RecordNotFound { id: id.to_string() })?;
            debug!(id, "storage delete");
            storage.save_unsynced()?;
            Ok(row)
        })
    }

    /// Remove every row
    pub fn clear(&mut self) -> Result<()> {
        self.synchronize(|storage| {
            let removed = storage.data.len();
            storage.data.clear();
            debug!(removed, "storage clear");
            storage.save_unsynced()
        })
    }

    /// Swap in a whole new table and save it
    ///
    /// The current table is kept if any row fails backend validation.
    pub fn replace(&mut self, table: Table) -> Result<()> {
        self.synchronize(|storage| {
            for row in table.values() {
                storage.backend.validate_row(row)?;
            }
            storage.data = table;
            debug!(rows = storage.data.len(), "storage replace");
            storage.save_unsynced()
        })
    }

    /// Modify the table in place, then save it
    pub fn modify<R>(&mut self, op: impl FnOnce(&mut Table) -> R) -> Result<R> {
        self.synchronize(|storage| {
            let result = op(&mut storage.data);
            storage.save_unsynced()?;
            Ok(result)
        })
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::memory()
    }
}
