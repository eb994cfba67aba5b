//! Selection
//!
//! Lazy, restartable scans over a snapshot of the table.

use std::collections::btree_map;

use crate::row::{Row, Table};

/// Decides whether a row belongs to a scan
///
/// Implemented for any `Fn(&str, &Row) -> bool` and for record `Query`s.
pub trait Predicate {
    fn matches(&self, id: &str, row: &Row) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&str, &Row) -> bool,
{
    fn matches(&self, id: &str, row: &Row) -> bool {
        self(id, row)
    }
}

/// Matches every row
#[derive(Debug, Clone, Copy, Default)]
pub struct Everything;

impl Predicate for Everything {
    fn matches(&self, _id: &str, _row: &Row) -> bool {
        true
    }
}

/// Rows matching a predicate, as of the moment the selection was made
///
/// The table is copied when the selection is created, so later mutations
/// of the repository are not visible. Each call to `iter` starts a fresh
/// pass; the predicate is evaluated lazily as the pass advances.
#[derive(Debug, Clone)]
pub struct Selection<P> {
    snapshot: Table,
    predicate: P,
}

impl<P: Predicate> Selection<P> {
    pub(crate) fn new(snapshot: Table, predicate: P) -> Self {
        Self { snapshot, predicate }
    }

    /// Start a pass over the matching `(id, row)` pairs
    pub fn iter(&self) -> SelectionIter<'_, P> {
        SelectionIter {
            inner: self.snapshot.iter(),
            predicate: &self.predicate,
        }
    }

    /// Number of matching rows
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// First matching row in id order
    pub fn first(&self) -> Option<(&str, &Row)> {
        self.iter().next()
    }

    /// Ids of the matching rows
    pub fn ids(&self) -> Vec<String> {
        self.iter().map(|(id, _)| id.to_string()).collect()
    }

    /// Number of rows in the snapshot, matching or not
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.len()
    }

    /// Consume the selection, yielding owned matching rows
    pub fn into_rows(self) -> impl Iterator<Item = (String, Row)> {
        let Self { snapshot, predicate } = self;
        snapshot
            .into_iter()
            .filter(move |(id, row)| predicate.matches(id, row))
    }
}

impl<'a, P: Predicate> IntoIterator for &'a Selection<P> {
    type Item = (&'a str, &'a Row);
    type IntoIter = SelectionIter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a `Selection`
pub struct SelectionIter<'a, P> {
    inner: btree_map::Iter<'a, String, Row>,
    predicate: &'a P,
}

impl<'a, P: Predicate> Iterator for SelectionIter<'a, P> {
    type Item = (&'a str, &'a Row);

    fn next(&mut self) -> Option<Self::Item> {
        for (id, row) in self.inner.by_ref() {
            if self.predicate.matches(id, row) {
                return Some((id.as_str(), row));
            }
        }
        None
    }
}
