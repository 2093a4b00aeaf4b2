//! Built-in migration steps.
//!
//! To add a version: bump [`crate::CODE_VERSION`], add a
//! `vNNN_<name>.rs` module whose step migrates from the previous code
//! version, and append it to [`BUILTIN_STEPS`]. Released steps are never
//! edited.

pub mod v001_purge_soft_deleted;

use crate::registry::MigrationStep;

/// All shipped steps, in order.
pub static BUILTIN_STEPS: &[MigrationStep] = &[v001_purge_soft_deleted::STEP];
