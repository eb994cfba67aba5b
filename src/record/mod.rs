//! Record Module
//!
//! Typed records on top of a row-level `Repository`.
//!
//! ## Capabilities
//! A record type implements three small traits and gets the rest from
//! `RecordSet` / `RecordExt`:
//!
//! ```text
//! Identifiable   id() / set_id()
//! FieldExporter  record_data() → Row
//! FieldImporter  from_row(id, Row) → Self
//!       └──────────────┬──────────────┘
//!                   Record   (table name, typed Patch, hooks)
//!                      │
//!             RecordSet<R>   create / find / find_by / filter / count
//!                            update_all / destroy_all / delete_all / clear_all
//!                            save / update / destroy (per record)
//! ```
//!
//! ## Hook order
//! - `save`:    pre_save → on_create | on_update → on_save
//! - `update`:  pre_update → apply → on_update → on_save
//! - `destroy`: pre_destroy → mark_destroyed → on_destroy

mod query;
mod set;

use crate::error::Result;
use crate::row::Row;

pub use query::Query;
pub use set::{RecordExt, RecordSet, Records};

/// Something with a string identity
pub trait Identifiable {
    /// The id, or `None` before one has been assigned
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

/// Exports a record's fields (without the id) as a row
pub trait FieldExporter {
    fn record_data(&self) -> Result<Row>;
}

/// Rebuilds a record from its id and row
pub trait FieldImporter: Sized {
    fn from_row(id: &str, row: Row) -> Result<Self>;
}

/// A typed entity persisted through a `RecordSet`
pub trait Record: Identifiable + FieldExporter + FieldImporter {
    /// Table name; YAML storage keeps the table in `{data_dir}/{TABLE}.yml`
    const TABLE: &'static str;

    /// Typed partial update accepted by `update` and `update_all`
    type Patch;

    /// Apply a partial update in memory
    fn apply(&mut self, patch: &Self::Patch);

    fn is_destroyed(&self) -> bool;

    fn mark_destroyed(&mut self);

    // -------------------------------------------------------------------------
    // Lifecycle hooks
    // -------------------------------------------------------------------------

    fn pre_save(&mut self) {}

    fn on_create(&mut self) {}

    fn on_update(&mut self) {}

    fn on_save(&mut self) {}

    fn pre_update(&mut self) {}

    fn pre_destroy(&mut self) {}

    fn on_destroy(&mut self) {}
}
