//! The schema version record.
//!
//! The store holds exactly one row in [`ds_db::VERSION_TABLE`]. Only the
//! functions here read or write it.

use crate::schema;
use ds_db::{DbResult, Transaction, VERSION_TABLE};

/// Schema version this build of the code expects.
pub const CODE_VERSION: i64 = 1;

/// Ensure the version record exists and return the version it holds.
///
/// Stores that predate version tracking get the version table created and a
/// record holding 0.
pub fn ensure_record(tx: &dyn Transaction) -> DbResult<i64> {
    if !tx.table_exists(VERSION_TABLE)? {
        log::info!("creating {VERSION_TABLE} table on untracked store");
        tx.create_table(&schema::MIGRATIONS)?;
    }
    tx.find_or_create_version(0)
}

/// Read the stored version without writing anything.
///
/// Returns 0 when the version table or its record is missing, which is how
/// [`ensure_record`] would initialize it.
pub fn read_record(tx: &dyn Transaction) -> DbResult<i64> {
    if !tx.table_exists(VERSION_TABLE)? {
        return Ok(0);
    }
    Ok(tx.read_version()?.unwrap_or(0))
}

/// Set the version record to `version`, creating it if needed.
pub fn stamp(tx: &dyn Transaction, version: i64) -> DbResult<()> {
    if tx.find_or_create_version(version)? != version {
        tx.update_version(version)?;
    }
    Ok(())
}

/// Advance the version record after a step has been applied.
pub fn advance(tx: &dyn Transaction, to: i64) -> DbResult<()> {
    tx.update_version(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_db::{Backend, DuckDbBackend};

    #[test]
    fn ensure_record_creates_table_and_defaults_to_zero() {
        let db = DuckDbBackend::in_memory().unwrap();
        let tx = db.begin().unwrap();
        assert_eq!(ensure_record(tx.as_ref()).unwrap(), 0);
        assert_eq!(ensure_record(tx.as_ref()).unwrap(), 0);
        tx.commit().unwrap();
        assert!(db.table_exists(VERSION_TABLE).unwrap());
    }

    #[test]
    fn read_record_does_not_create() {
        let db = DuckDbBackend::in_memory().unwrap();
        let tx = db.begin().unwrap();
        assert_eq!(read_record(tx.as_ref()).unwrap(), 0);
        tx.commit().unwrap();
        assert!(!db.table_exists(VERSION_TABLE).unwrap());
    }

    #[test]
    fn stamp_then_advance() {
        let db = DuckDbBackend::in_memory().unwrap();
        let tx = db.begin().unwrap();
        tx.create_table(&schema::MIGRATIONS).unwrap();
        stamp(tx.as_ref(), 5).unwrap();
        assert_eq!(read_record(tx.as_ref()).unwrap(), 5);
        stamp(tx.as_ref(), 2).unwrap();
        assert_eq!(read_record(tx.as_ref()).unwrap(), 2);
        advance(tx.as_ref(), 3).unwrap();
        assert_eq!(read_record(tx.as_ref()).unwrap(), 3);
    }
}
