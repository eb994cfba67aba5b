//! RecordSet
//!
//! The per-record-type repository handle.

use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::error::{RepoError, Result};
use crate::repository::{Repository, Selection};

use super::{Query, Record};

/// Typed repository for one record type
///
/// ## Concurrency:
/// - `repo`: Protected by a Mutex so every method takes `&self`, which lets
///   a set live in a lazily initialized static for the process lifetime
/// - The lock is released before any hook or `record_data` call, so hooks
///   may use the set themselves
pub struct RecordSet<R> {
    repo: Mutex<Repository>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordSet<R> {
    /// Wrap an existing repository
    pub fn new(repo: Repository) -> Self {
        Self {
            repo: Mutex::new(repo),
            _record: PhantomData,
        }
    }

    /// In-memory set with random ids
    pub fn memory() -> Self {
        Self::new(Repository::memory())
    }

    /// Open the set for `R::TABLE` as described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Repository::open(config, R::TABLE)?))
    }

    /// Run `op` against the row-level repository
    pub fn with_repository<T>(&self, op: impl FnOnce(&mut Repository) -> T) -> T {
        op(&mut self.repo.lock())
    }

    // =========================================================================
    // Class-level Operations
    // =========================================================================

    /// Persist a new record, assigning an id if it has none
    ///
    /// Fails with `EntryExists` if the id is already taken.
    pub fn create(&self, mut record: R) -> Result<R> {
        let id = self.assign_id(&mut record)?;
        record.pre_save();
        let row = record.record_data()?;
        self.repo.lock().create(&id, row)?;
        record.on_create();
        record.on_save();
        debug!(table = R::TABLE, id = %id, "record created");
        Ok(record)
    }

    /// Load a record by id
    ///
    /// Fails with `RecordNotFound` if absent.
    pub fn find(&self, id: &str) -> Result<R> {
        self.get(id)?
            .ok_or_else(|| RepoError::RecordNotFound { id: id.to_string() })
    }

    /// Load a record by id, if present
    pub fn get(&self, id: &str) -> Result<Option<R>> {
        let row = self.repo.lock().get(id);
        row.map(|row| R::from_row(id, row)).transpose()
    }

    /// First record (in id order) matching `query`
    ///
    /// Fails with `NoMatch` if nothing matches.
    pub fn find_by(&self, query: &Query) -> Result<R> {
        let found = {
            let repo = self.repo.lock();
            repo.storage()
                .data()
                .iter()
                .find(|(_, row)| query.matches(row))
                .map(|(id, row)| (id.clone(), row.clone()))
        };
        match found {
            Some((id, row)) => R::from_row(&id, row),
            None => Err(RepoError::NoMatch {
                query: query.to_string(),
            }),
        }
    }

    /// Lazily scan the records matching `query`
    pub fn filter(&self, query: &Query) -> Records<R> {
        Records {
            selection: self.repo.lock().select(query.clone()),
            _record: PhantomData,
        }
    }

    /// Lazily scan every record
    pub fn all(&self) -> Records<R> {
        self.filter(&Query::all())
    }

    /// Number of records matching `query`
    pub fn count(&self, query: &Query) -> usize {
        let repo = self.repo.lock();
        repo.storage()
            .data()
            .values()
            .filter(|row| query.matches(row))
            .count()
    }

    /// Check whether a record with `id` is stored
    pub fn exists(&self, id: &str) -> bool {
        self.repo.lock().exists(id)
    }

    /// Apply `patch` to every record matching `query`, with hooks
    ///
    /// Returns the number of records updated.
    pub fn update_all(&self, query: &Query, patch: &R::Patch) -> Result<usize> {
        let mut updated = 0;
        for record in self.filter(query).iter() {
            let mut record = record?;
            self.update(&mut record, patch)?;
            updated += 1;
        }
        debug!(table = R::TABLE, updated, "update_all");
        Ok(updated)
    }

    /// Destroy every record matching `query`, with hooks
    ///
    /// Returns the number of records destroyed.
    pub fn destroy_all(&self, query: &Query) -> Result<usize> {
        let mut destroyed = 0;
        for record in self.filter(query).iter() {
            let mut record = record?;
            self.destroy(&mut record)?;
            destroyed += 1;
        }
        debug!(table = R::TABLE, destroyed, "destroy_all");
        Ok(destroyed)
    }

    /// Remove every row matching `query` without decoding or hooks
    ///
    /// Returns the number of rows removed.
    pub fn delete_all(&self, query: &Query) -> Result<usize> {
        let removed = self.repo.lock().storage_mut().modify(|table| {
            let before = table.len();
            table.retain(|_, row| !query.matches(row));
            before - table.len()
        })?;
        debug!(table = R::TABLE, removed, "delete_all");
        Ok(removed)
    }

    /// Remove every row
    pub fn clear_all(&self) -> Result<()> {
        self.repo.lock().clear()
    }

    // =========================================================================
    // Instance-level Operations
    // =========================================================================

    /// Create or update `record`
    ///
    /// Returns `true` if the record was created.
    pub fn save(&self, record: &mut R) -> Result<bool> {
        let id = self.assign_id(record)?;
        record.pre_save();
        let row = record.record_data()?;
        let created = self.repo.lock().save(&id, row)?;
        if created {
            record.on_create();
        } else {
            record.on_update();
        }
        record.on_save();
        debug!(table = R::TABLE, id = %id, created, "record saved");
        Ok(created)
    }

    /// Apply `patch` to a stored record and persist it
    ///
    /// Fails with `EntryMissing` (leaving `record` untouched) if the record
    /// is not stored.
    pub fn update(&self, record: &mut R, patch: &R::Patch) -> Result<()> {
        let id = Self::require_id(record)?;
        if !self.exists(&id) {
            return Err(RepoError::EntryMissing { id });
        }
        record.pre_update();
        record.apply(patch);
        let row = record.record_data()?;
        self.repo.lock().update(&id, row)?;
        record.on_update();
        record.on_save();
        Ok(())
    }

    /// Delete a stored record and mark it destroyed
    ///
    /// Fails with `EntryMissing` (without running any hook) if the record is
    /// not stored.
    pub fn destroy(&self, record: &mut R) -> Result<()> {
        let id = Self::require_id(record)?;
        if !self.exists(&id) {
            return Err(RepoError::EntryMissing { id });
        }
        record.pre_destroy();
        self.repo.lock().delete(&id)?;
        record.mark_destroyed();
        record.on_destroy();
        debug!(table = R::TABLE, id = %id, "record destroyed");
        Ok(())
    }

    /// Check whether `record` is stored
    pub fn contains(&self, record: &R) -> bool {
        record.id().map(|id| self.exists(id)).unwrap_or(false)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn assign_id(&self, record: &mut R) -> Result<String> {
        if let Some(id) = record.id().filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        let id = self.repo.lock().next_id()?;
        record.set_id(id.clone());
        Ok(id)
    }

    fn require_id(record: &R) -> Result<String> {
        record
            .id()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or(RepoError::MissingId)
    }
}

/// Records matching a query, as of the moment the scan was started
///
/// Restartable: every `iter` call begins a new lazy pass over the same
/// snapshot, decoding rows as it goes.
pub struct Records<R> {
    selection: Selection<Query>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Records<R> {
    /// Start a pass, decoding each matching row
    pub fn iter(&self) -> impl Iterator<Item = Result<R>> + '_ {
        self.selection
            .iter()
            .map(|(id, row)| R::from_row(id, row.clone()))
    }

    /// Number of matching records
    pub fn count(&self) -> usize {
        self.selection.count()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.first().is_none()
    }

    /// First matching record in id order
    pub fn first(&self) -> Result<Option<R>> {
        self.iter().next().transpose()
    }

    /// Ids of the matching records
    pub fn ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    /// Decode every matching record
    pub fn to_vec(&self) -> Result<Vec<R>> {
        self.iter().collect()
    }
}

/// Instance-level record operations as methods on the record itself
pub trait RecordExt: Record {
    /// Create or update; returns `true` if created
    fn save(&mut self, set: &RecordSet<Self>) -> Result<bool> {
        set.save(self)
    }

    fn update(&mut self, set: &RecordSet<Self>, patch: &Self::Patch) -> Result<()> {
        set.update(self, patch)
    }

    fn destroy(&mut self, set: &RecordSet<Self>) -> Result<()> {
        set.destroy(self)
    }

    fn exists(&self, set: &RecordSet<Self>) -> bool {
        set.contains(self)
    }
}

impl<R: Record> RecordExt for R {}
