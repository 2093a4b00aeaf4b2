//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use ds_db::DuckDbBackend;
use std::path::Path;

use crate::cli::GlobalArgs;
use crate::config::Config;

/// Resolve configuration and open the datastore it names.
pub(crate) fn open_datastore(global: &GlobalArgs) -> Result<DuckDbBackend> {
    let config = Config::resolve(global, Path::new("."))?;
    let path = config.database_path(global);
    log::debug!("opening datastore at {path}");
    DuckDbBackend::new(&path).with_context(|| format!("Failed to open datastore {path}"))
}
