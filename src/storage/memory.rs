//! Memory Backend
//!
//! Keeps nothing outside the storage's own table.

use crate::error::Result;
use crate::row::Table;

use super::Persistence;

/// Backend with no persistence: load finds nothing, save does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

impl Persistence for MemoryBackend {
    fn load(&mut self) -> Result<Option<Table>> {
        Ok(None)
    }

    fn save(&mut self, _data: &Table) -> Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
