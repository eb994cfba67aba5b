//! Id generation
//!
//! Hands out ids for records created without one.

use uuid::Uuid;

use crate::config::IdStrategy;
use crate::error::{RepoError, Result};
use crate::row::Table;

/// Generates ids according to an `IdStrategy`
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,

    /// Last sequential id handed out (or seen in storage)
    counter: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy, counter: 0 }
    }

    /// Continue the sequence after the largest numeric id in `table`
    pub fn seed(&mut self, table: &Table) {
        let max = table
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.counter = self.counter.max(max);
    }

    /// Produce an id not present in `table`
    ///
    /// Fails with `IdsExhausted` once the sequential counter reaches `u64::MAX`.
    pub fn next_id(&mut self, table: &Table) -> Result<String> {
        loop {
            let candidate = match self.strategy {
                IdStrategy::Random => Uuid::new_v4().simple().to_string(),
                IdStrategy::Sequential => {
                    self.counter = self
                        .counter
                        .checked_add(1)
                        .ok_or(RepoError::IdsExhausted { last: self.counter })?;
                    self.counter.to_string()
                }
            };
            if !table.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }
}
