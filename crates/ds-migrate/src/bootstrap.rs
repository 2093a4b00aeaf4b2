//! Pristine-store detection and initialization.

use crate::error::{MigrationError, MigrationResult};
use crate::schema::{ALL_TABLES, WELL_KNOWN_TABLE};
use crate::transaction::with_transaction;
use crate::version;
use ds_db::Backend;

/// Whether the store has never been initialized.
///
/// A store is new when the well-known entity table is absent.
pub fn is_new(backend: &dyn Backend) -> MigrationResult<bool> {
    let exists = backend
        .table_exists(WELL_KNOWN_TABLE)
        .map_err(MigrationError::Connectivity)?;
    Ok(!exists)
}

/// Create the full current schema and stamp it with `code_version`.
///
/// Runs in a single transaction: either every table and the version record
/// exist afterwards, or nothing was written. No migration step runs on this
/// path.
pub fn initialize(backend: &dyn Backend, code_version: i64) -> MigrationResult<()> {
    log::info!("initializing database.");
    with_transaction(
        backend,
        |tx| {
            for table in ALL_TABLES {
                log::debug!("creating table {}", table.name);
                tx.create_table(table).map_err(MigrationError::Initialize)?;
            }
            version::stamp(tx, code_version).map_err(MigrationError::Initialize)
        },
        MigrationError::Initialize,
    )
}
