//! Record queries
//!
//! Field-equality conditions evaluated against rows.

use std::fmt;

use crate::error::Result;
use crate::repository::Predicate;
use crate::row::{Row, Value};

use super::FieldExporter;

/// All-of field equality conditions
///
/// An empty query matches every row. A condition on a field the row lacks
/// never matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query matching everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Check a row against every condition
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }

    /// Check a record's exported fields against every condition
    pub fn matches_record<R: FieldExporter>(&self, record: &R) -> Result<bool> {
        Ok(self.matches(&record.record_data()?))
    }
}

impl Predicate for Query {
    fn matches(&self, _id: &str, row: &Row) -> bool {
        Query::matches(self, row)
    }
}

impl From<Row> for Query {
    fn from(row: Row) -> Self {
        Self {
            conditions: row.into_iter().collect(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let rendered = serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| "?".to_string());
            write!(f, "{}: {}", field, rendered)?;
        }
        write!(f, "}}")
    }
}
