//! # record-repo
//!
//! A minimal record/repository layer over pluggable key-value storage:
//! - Typed records with create/find/update/destroy and lifecycle hooks
//! - Row-level repository with existence-checked mutations
//! - In-memory or YAML-file storage, flushed after every mutation
//! - Lazy, restartable scans over snapshots of the table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     RecordSet<R: Record>                     │
//! │        (typed records, hooks, Query, lazy Records<R>)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  id + Row
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Repository                            │
//! │     (EntryExists / EntryMissing guards, ids, Selection)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Storage                              │
//! │              (Table, synchronize, save on mutate)            │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            ▼                                  ▼
//!     ┌─────────────┐                    ┌─────────────┐
//!     │   Memory    │                    │    YAML     │
//!     │  (no-op)    │                    │ (one file)  │
//!     └─────────────┘                    └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logging;

pub mod row;
pub mod storage;
pub mod repository;
pub mod record;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RepoError, Result};
pub use config::{Config, IdStrategy, StorageKind};
pub use row::{Row, Table, Value};
pub use storage::Storage;
pub use repository::Repository;
pub use record::{
    FieldExporter, FieldImporter, Identifiable, Query, Record, RecordExt, RecordSet, Records,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of record-repo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
