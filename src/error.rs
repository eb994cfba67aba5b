//! Error types for record-repo
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RepoError
pub type Result<T> = std::result::Result<T, RepoError>;

/// Unified error type for storage, repository and record operations
#[derive(Debug, Error)]
pub enum RepoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Record already exists: {id}")]
    RecordExists { id: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    // -------------------------------------------------------------------------
    // Repository Errors
    // -------------------------------------------------------------------------
    #[error("Entry already exists: {id}")]
    EntryExists { id: String },

    #[error("Entry missing: {id}")]
    EntryMissing { id: String },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    /// No record matched a `find_by` query
    #[error("Record not found: no record matches {query}")]
    NoMatch { query: String },

    #[error("Record has no id")]
    MissingId,

    #[error("Sequential ids exhausted after {last}")]
    IdsExhausted { last: u64 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepoError {
    /// True for every "nothing there" flavour (storage, repository, query)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::EntryMissing { .. } | Self::NoMatch { .. }
        )
    }

    /// True for every duplicate-id flavour
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::RecordExists { .. } | Self::EntryExists { .. })
    }
}

impl From<serde_yaml::Error> for RepoError {
    fn from(err: serde_yaml::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}
