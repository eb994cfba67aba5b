//! Repository Module
//!
//! Mediates id-keyed CRUD between callers and a `Storage`.
//!
//! ## Responsibilities
//! - Existence-checked create/update/delete with repository-level errors
//! - Create-or-update (`save`) and create-or-noop (`touch`)
//! - Linear predicate scans over snapshots of the table
//! - Id assignment for rows created without one
//!
//! No caching: every read consults the storage's table directly.

mod id;
mod selection;

use tracing::debug;

use crate::config::{Config, IdStrategy};
use crate::error::{RepoError, Result};
use crate::row::Row;
use crate::storage::Storage;

pub use id::IdGenerator;
pub use selection::{Everything, Predicate, Selection, SelectionIter};

/// Row-level repository over exactly one storage
#[derive(Debug)]
pub struct Repository {
    /// The backing storage (owned)
    storage: Storage,

    /// Assigns ids to new rows
    ids: IdGenerator,
}

impl Repository {
    /// Create a repository with random ids
    pub fn new(storage: Storage) -> Self {
        Self::with_id_strategy(storage, IdStrategy::Random)
    }

    /// Create a repository with the given id strategy
    pub fn with_id_strategy(storage: Storage, strategy: IdStrategy) -> Self {
        let mut ids = IdGenerator::new(strategy);
        ids.seed(storage.data());
        Self { storage, ids }
    }

    /// In-memory repository with random ids
    pub fn memory() -> Self {
        Self::new(Storage::memory())
    }

    /// Open the repository for table `name` as described by `config`
    pub fn open(config: &Config, name: &str) -> Result<Self> {
        let storage = Storage::open(config, name)?;
        Ok(Self::with_id_strategy(storage, config.id_strategy))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a new entry
    ///
    /// Fails with `EntryExists` if `id` is already present.
    pub fn create(&mut self, id: &str, row: Row) -> Result<()> {
        if self.storage.exists(id) {
            return Err(RepoError::EntryExists { id: id.to_string() });
        }
        self.storage.insert(id, row)?;
        debug!(id, "repository create");
        Ok(())
    }

    /// Create the entry unless it already exists
    ///
    /// Returns `true` if the entry was created, `false` if it was left alone.
    pub fn touch(&mut self, id: &str, row: Row) -> Result<bool> {
        if self.storage.exists(id) {
            return Ok(false);
        }
        self.create(id, row)?;
        Ok(true)
    }

    /// Create or update the entry
    ///
    /// Returns `true` if the entry was created, `false` if it was updated.
    pub fn save(&mut self, id: &str, row: Row) -> Result<bool> {
        if self.storage.exists(id) {
            self.update(id, row)?;
            Ok(false)
        } else {
            self.create(id, row)?;
            Ok(true)
        }
    }

    /// Replace an existing entry
    ///
    /// Fails with `EntryMissing` if `id` is absent.
    pub fn update(&mut self, id: &str, row: Row) -> Result<()> {
        if !self.storage.exists(id) {
            return Err(RepoError::EntryMissing { id: id.to_string() });
        }
        self.storage.update(id, row)?;
        debug!(id, "repository update");
        Ok(())
    }

    /// Delete an existing entry, returning its row
    ///
    /// Fails with `EntryMissing` if `id` is absent.
    pub fn delete(&mut self, id: &str) -> Result<Row> {
        if !self.storage.exists(id) {
            return Err(RepoError::EntryMissing { id: id.to_string() });
        }
        let row = self.storage.delete(id)?;
        debug!(id, "repository delete");
        Ok(row)
    }

    /// Delete every entry
    pub fn clear(&mut self) -> Result<()> {
        self.storage.clear()
    }

    /// Produce an id not yet used in this repository
    ///
    /// Fails with `IdsExhausted` when the sequential counter has run out.
    pub fn next_id(&mut self) -> Result<String> {
        self.ids.next_id(self.storage.data())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch an entry's row
    ///
    /// Fails with `EntryMissing` if `id` is absent.
    pub fn fetch(&self, id: &str) -> Result<Row> {
        self.get(id)
            .ok_or_else(|| RepoError::EntryMissing { id: id.to_string() })
    }

    /// Get an entry's row, if present
    pub fn get(&self, id: &str) -> Option<Row> {
        self.storage.get(id).cloned()
    }

    /// Check whether `id` is present
    pub fn exists(&self, id: &str) -> bool {
        self.storage.exists(id)
    }

    /// Scan for rows matching `predicate`
    ///
    /// The table is snapshotted now; the scan itself is lazy.
    pub fn query<F>(&self, predicate: F) -> Selection<F>
    where
        F: Fn(&str, &Row) -> bool,
    {
        self.select(predicate)
    }

    /// Scan for rows matching any `Predicate`
    pub fn select<P: Predicate>(&self, predicate: P) -> Selection<P> {
        Selection::new(self.storage.data().clone(), predicate)
    }

    /// Scan every row
    pub fn all(&self) -> Selection<Everything> {
        self.select(Everything)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing storage
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the backing storage mutably (for `load`, `replace`, `modify`)
    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    /// Get the id strategy
    pub fn id_strategy(&self) -> IdStrategy {
        self.ids.strategy()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::memory()
    }
}
