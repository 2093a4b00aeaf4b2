//! Integration tests running the engine against on-disk DuckDB stores,
//! reopening the store between runs the way a restarted process would.

use ds_db::{Backend, DuckDbBackend};
use ds_migrate::schema::{ALL_TABLES, LEGACY_SOFT_DELETE_TABLES};
use ds_migrate::{
    migrate_datastore, MigrationError, MigrationOutcome, MigrationRunner, MigrationStatus,
    CODE_VERSION,
};
use std::path::Path;

// ── Helpers ────────────────────────────────────────────────────────────

fn open(path: &Path) -> DuckDbBackend {
    DuckDbBackend::from_path(path).unwrap()
}

fn count(db: &DuckDbBackend, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

fn seed_legacy_store(db: &DuckDbBackend) {
    for table in LEGACY_SOFT_DELETE_TABLES {
        db.conn()
            .execute_batch(&format!(
                "CREATE TABLE {table} (id BIGINT PRIMARY KEY, payload VARCHAR, deleted_at TIMESTAMP);
                 INSERT INTO {table} VALUES
                     (1, 'live', NULL),
                     (2, 'gone', TIMESTAMP '2018-03-04 05:06:07');"
            ))
            .unwrap();
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn fresh_file_store_initializes_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datastore.duckdb");

    {
        let db = open(&path);
        assert_eq!(
            migrate_datastore(&db).unwrap(),
            MigrationOutcome::Initialized {
                version: CODE_VERSION
            }
        );
    }

    let db = open(&path);
    for table in ALL_TABLES {
        assert!(db.table_exists(table.name).unwrap(), "{}", table.name);
    }
    assert_eq!(
        migrate_datastore(&db).unwrap(),
        MigrationOutcome::UpToDate {
            version: CODE_VERSION
        }
    );
}

#[test]
fn legacy_file_store_is_migrated_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.duckdb");
    seed_legacy_store(&open(&path));

    {
        let db = open(&path);
        let status = MigrationRunner::builtin(&db).status().unwrap();
        assert!(matches!(status, MigrationStatus::Pending { from: 0, to: 1, .. }));
        let outcome = migrate_datastore(&db).unwrap();
        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                from: 0,
                to: 1,
                steps_applied: 1
            }
        );
    }

    let db = open(&path);
    assert_eq!(count(&db, "SELECT version FROM migrations"), 1);
    for table in LEGACY_SOFT_DELETE_TABLES {
        assert_eq!(
            count(&db, &format!("SELECT COUNT(*) FROM {table} WHERE deleted_at IS NOT NULL")),
            0,
            "{table}"
        );
        assert_eq!(
            count(&db, &format!("SELECT COUNT(*) FROM {table} WHERE payload = 'live'")),
            1,
            "{table}"
        );
    }
    assert_eq!(
        MigrationRunner::builtin(&db).status().unwrap(),
        MigrationStatus::UpToDate { version: 1 }
    );
}

#[test]
fn stale_binary_refuses_newer_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newer.duckdb");
    {
        let db = open(&path);
        migrate_datastore(&db).unwrap();
        db.conn()
            .execute_batch("UPDATE migrations SET version = 7")
            .unwrap();
    }

    let db = open(&path);
    let err = migrate_datastore(&db).unwrap_err();
    assert!(matches!(
        err,
        MigrationError::BackwardVersion { stored: 7, code: 1 }
    ));
    assert_eq!(count(&db, "SELECT version FROM migrations"), 7);
}
