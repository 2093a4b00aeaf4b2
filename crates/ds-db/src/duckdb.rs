//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::schema::{quote_ident, TableDef};
use crate::traits::{Backend, Transaction, VERSION_TABLE};
use duckdb::Connection;
use std::path::Path;

/// DuckDB database backend
///
/// Single-threaded: migration runs once at startup and owns the connection,
/// so no `Mutex` is needed.
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Backend for DuckDbBackend {
    fn table_exists(&self, name: &str) -> DbResult<bool> {
        table_exists(&self.conn, name)
    }

    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        Ok(Box::new(DuckDbTransaction {
            conn: &self.conn,
            finished: false,
        }))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// An open `BEGIN` / `COMMIT` block on a [`DuckDbBackend`] connection.
///
/// Rolls back on drop unless committed.
pub struct DuckDbTransaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl Transaction for DuckDbTransaction<'_> {
    fn table_exists(&self, name: &str) -> DbResult<bool> {
        table_exists(self.conn, name)
    }

    fn create_table(&self, table: &TableDef) -> DbResult<()> {
        let sql = table.create_sql()?;
        self.conn
            .execute_batch(&sql)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn read_version(&self) -> DbResult<Option<i64>> {
        let sql = format!(
            "SELECT version FROM {} ORDER BY id LIMIT 1",
            quote_ident(VERSION_TABLE)?
        );
        match self.conn.query_row(&sql, [], |row| row.get::<_, i64>(0)) {
            Ok(version) => Ok(Some(version)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_or_create_version(&self, default: i64) -> DbResult<i64> {
        if let Some(version) = self.read_version()? {
            return Ok(version);
        }
        let sql = format!(
            "INSERT INTO {} (id, version) VALUES (1, ?)",
            quote_ident(VERSION_TABLE)?
        );
        self.conn.execute(&sql, duckdb::params![default])?;
        Ok(default)
    }

    fn update_version(&self, version: i64) -> DbResult<()> {
        let sql = format!(
            "UPDATE {} SET version = ?, updated_at = current_timestamp",
            quote_ident(VERSION_TABLE)?
        );
        let updated = self.conn.execute(&sql, duckdb::params![version])?;
        if updated != 1 {
            return Err(DbError::ExecutionError(format!(
                "expected exactly one version record, updated {updated}"
            )));
        }
        Ok(())
    }

    fn delete_where_not_null(&self, table: &str, column: &str) -> DbResult<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE {} IS NOT NULL",
            quote_ident(table)?,
            quote_ident(column)?
        );
        let deleted = self.conn.execute(&sql, [])?;
        Ok(deleted)
    }

    fn commit(mut self: Box<Self>) -> DbResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))?;
        self.finished = true;
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> DbResult<()> {
        self.finished = true;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

impl Drop for DuckDbTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                log::warn!("ROLLBACK of abandoned transaction failed: {e}");
            }
        }
    }
}

/// Check table existence via `information_schema`, handling schema-qualified
/// names.
fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let (schema, table) = match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("main", name),
    };

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    Ok(count > 0)
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
