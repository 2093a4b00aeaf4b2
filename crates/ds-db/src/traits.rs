//! Backend and transaction traits

use crate::error::DbResult;
use crate::schema::TableDef;

/// Name of the table holding the singleton schema version record.
pub const VERSION_TABLE: &str = "migrations";

/// A relational backing store.
///
/// Everything that mutates the store goes through a [`Transaction`] obtained
/// from [`Backend::begin`].
pub trait Backend {
    /// Check if a table exists (outside of any transaction)
    fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Open a transaction. The transaction has exclusive use of the store
    /// until it is committed, rolled back, or dropped.
    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// An open transaction against a [`Backend`].
///
/// This is the capability handed to migration transforms. Dropping a
/// transaction without calling [`Transaction::commit`] rolls it back.
pub trait Transaction {
    /// Check if a table exists, seeing uncommitted DDL of this transaction
    fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Create a table from its definition if it does not exist yet
    fn create_table(&self, table: &TableDef) -> DbResult<()>;

    /// Execute one or more raw SQL statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Read the version record, `None` if no record exists
    fn read_version(&self) -> DbResult<Option<i64>>;

    /// Return the version record, inserting one holding `default` if absent
    fn find_or_create_version(&self, default: i64) -> DbResult<i64>;

    /// Overwrite the version held by the version record
    fn update_version(&self, version: i64) -> DbResult<()>;

    /// Delete every row of `table` whose `column` is not NULL, returning the
    /// number of rows removed
    fn delete_where_not_null(&self, table: &str, column: &str) -> DbResult<usize>;

    /// Commit the transaction
    fn commit(self: Box<Self>) -> DbResult<()>;

    /// Roll the transaction back
    fn rollback(self: Box<Self>) -> DbResult<()>;
}
