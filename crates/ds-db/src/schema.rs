//! Table definitions used to create entity tables.
//!
//! A [`TableDef`] is a static description of one table: its name and its
//! columns. Backends render it into `CREATE TABLE` DDL.

use crate::error::{DbError, DbResult};

/// A single column of a [`TableDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name (unquoted)
    pub name: &'static str,
    /// SQL type, e.g. `BIGINT` or `VARCHAR`
    pub sql_type: &'static str,
    /// Trailing column constraints, e.g. `NOT NULL UNIQUE`; may be empty
    pub constraints: &'static str,
}

impl ColumnDef {
    /// Create a column definition.
    pub const fn new(name: &'static str, sql_type: &'static str, constraints: &'static str) -> Self {
        Self {
            name,
            sql_type,
            constraints,
        }
    }
}

/// Static definition of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    /// Table name (unquoted)
    pub name: &'static str,
    /// Columns in declaration order
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    /// Render `CREATE TABLE IF NOT EXISTS` DDL for this table.
    pub fn create_sql(&self) -> DbResult<String> {
        if self.columns.is_empty() {
            return Err(DbError::ExecutionError(format!(
                "table {} has no columns",
                self.name
            )));
        }

        let mut columns = Vec::with_capacity(self.columns.len());
        for col in self.columns {
            let mut line = format!("{} {}", quote_ident(col.name)?, col.sql_type);
            if !col.constraints.is_empty() {
                line.push(' ');
                line.push_str(col.constraints);
            }
            columns.push(line);
        }

        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(self.name)?,
            columns.join(", ")
        ))
    }

    /// Whether the table declares a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// Quote an identifier for splicing into generated SQL.
///
/// Embedded double quotes are doubled. Empty identifiers and identifiers
/// containing NUL are rejected.
pub fn quote_ident(name: &str) -> DbResult<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(DbError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
