//! Version 0 -> 1: purge soft-deleted rows.
//!
//! Soft deletes are retired. Rows carrying a non-NULL `deleted_at` marker
//! are physically removed from every legacy table. The marker column stays:
//! not every dialect can drop a column, so that happens in a later version.
//! This step is destructive and cannot be undone.

use crate::registry::MigrationStep;
use crate::schema::{LEGACY_SOFT_DELETE_TABLES, SOFT_DELETE_COLUMN};
use ds_db::{DbResult, Transaction};

pub const STEP: MigrationStep = MigrationStep::new(0, "purge_soft_deleted", purge_soft_deleted);

fn purge_soft_deleted(tx: &dyn Transaction) -> DbResult<()> {
    for table in LEGACY_SOFT_DELETE_TABLES {
        let purged = tx.delete_where_not_null(table, SOFT_DELETE_COLUMN)?;
        log::debug!("purged {purged} soft-deleted row(s) from {table}");
    }
    Ok(())
}
