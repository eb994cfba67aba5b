//! Configuration for record-repo
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{RepoError, Result};

/// Main configuration for a repository
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Which storage backend new repositories get
    pub storage: StorageKind,

    /// Root directory for YAML files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── people.yml       (one file per record table)
    ///     └── books.yml
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Identity Configuration
    // -------------------------------------------------------------------------
    /// How ids are assigned to records created without one
    pub id_strategy: IdStrategy,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Plain in-memory table, nothing is persisted
    Memory,

    /// Table mirrored to `{data_dir}/{table}.yml`, rewritten on every mutation
    Yaml,
}

/// Id assignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random UUID v4 token (simple hex form)
    Random,

    /// Decimal counter continuing after the largest numeric id in storage
    Sequential,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::Memory,
            data_dir: PathBuf::from("./record_data"),
            id_strategy: IdStrategy::Random,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the YAML file backing the table `name`
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.yml", name))
    }

    /// Reject configurations that cannot open a storage
    pub fn validate(&self) -> Result<()> {
        if self.storage == StorageKind::Yaml && self.data_dir.as_os_str().is_empty() {
            return Err(RepoError::Config(
                "YAML storage requires a non-empty data_dir".to_string(),
            ));
        }
        Ok(())
    }

    /// The data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage backend
    pub fn storage(mut self, kind: StorageKind) -> Self {
        self.config.storage = kind;
        self
    }

    /// Use YAML storage rooted at `path`
    pub fn yaml(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage = StorageKind::Yaml;
        self.config.data_dir = path.into();
        self
    }

    /// Set the data directory (root for YAML files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the id strategy
    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.config.id_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
