//! Storage Module
//!
//! Raw id → row table with swappable persistence.
//!
//! ## Responsibilities
//! - Own the in-memory `Table`
//! - Guard mutations (insert-if-absent, update/delete-if-present)
//! - Flush the whole table through the backend after every mutation
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Storage                                  │
//! │ ┌──────────────┐    ┌──────────────────┐ │
//! │ │ Table        │───▶│ dyn Persistence  │ │
//! │ │ (BTreeMap)   │    │ Memory | Yaml    │ │
//! │ └──────────────┘    └──────────────────┘ │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## YAML File Format
//! ```text
//! '1':
//!   name: Data
//! 9f2c...:
//!   name: ThatGuy
//!   junk: 2
//! ```

mod memory;
mod store;
mod yaml;

use std::fmt::Debug;

use crate::error::Result;
use crate::row::{Row, Table};

pub use memory::MemoryBackend;
pub use store::Storage;
pub use yaml::YamlBackend;

/// Persistence backend behind a `Storage`
///
/// Backends only move whole tables; all per-id guarding lives in `Storage`.
pub trait Persistence: Debug + Send {
    /// Read the persisted table, or `None` when nothing has been persisted yet
    fn load(&mut self) -> Result<Option<Table>>;

    /// Persist the full table
    fn save(&mut self, data: &Table) -> Result<()>;

    /// Human-readable backend description for logs
    fn describe(&self) -> String;

    /// Reject a row this backend could not load back unchanged
    fn validate_row(&self, _row: &Row) -> Result<()> {
        Ok(())
    }
}
