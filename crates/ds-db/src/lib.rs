//! ds-db - Persistence boundary for the datastore
//!
//! This crate provides the [`Backend`] and [`Transaction`] traits the schema
//! migration engine is written against, the table-definition types used to
//! describe entity schemas, and a DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod schema;
pub mod traits;

pub use crate::duckdb::{DuckDbBackend, DuckDbTransaction};
pub use error::{DbError, DbResult};
pub use schema::{quote_ident, ColumnDef, TableDef};
pub use traits::{Backend, Transaction, VERSION_TABLE};
