//! Configuration for the ds CLI, read from `datastore.yml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "datastore.yml";

/// Datastore path used when neither flag nor config names one.
pub(crate) const DEFAULT_DATABASE_PATH: &str = "datastore.duckdb";

/// Top-level configuration from datastore.yml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Backing store connection
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Backing store connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DatabaseConfig {
    /// DuckDB file path, or ":memory:"
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

impl Config {
    /// Load configuration from a YAML file
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from YAML text
    pub(crate) fn parse(content: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolve the configuration for this invocation.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    pub(crate) fn resolve(global: &GlobalArgs, dir: &Path) -> Result<Self> {
        match &global.config {
            Some(path) => Self::load(Path::new(path)),
            None => {
                let default = dir.join(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Datastore path: `--database` / `DS_DATABASE` beats the config file.
    pub(crate) fn database_path(&self, global: &GlobalArgs) -> String {
        global
            .database
            .clone()
            .unwrap_or_else(|| self.database.path.clone())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
