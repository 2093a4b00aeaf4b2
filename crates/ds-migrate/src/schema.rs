//! Current entity schema of the datastore.
//!
//! These definitions are what [`crate::bootstrap::initialize`] creates on a
//! pristine store. Migration steps must not depend on them: a step sees the
//! schema as it was at its source version.

use ds_db::{ColumnDef, TableDef, VERSION_TABLE};

/// Table whose presence marks a store as already initialized.
pub const WELL_KNOWN_TABLE: &str = "bundles";

/// Soft-delete marker column carried by version 0 stores.
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";

/// Version 0 tables that carried the soft-delete marker.
pub const LEGACY_SOFT_DELETE_TABLES: &[&str] = &[
    "ca_certs",
    "bundles",
    "attested_node_entries",
    "join_tokens",
    "node_resolver_map_entries",
    "selectors",
    "registered_entries",
];

const ID: ColumnDef = ColumnDef::new("id", "BIGINT", "PRIMARY KEY");
const CREATED_AT: ColumnDef =
    ColumnDef::new("created_at", "TIMESTAMP", "NOT NULL DEFAULT current_timestamp");
const UPDATED_AT: ColumnDef =
    ColumnDef::new("updated_at", "TIMESTAMP", "NOT NULL DEFAULT current_timestamp");

pub const BUNDLES: TableDef = TableDef {
    name: "bundles",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("trust_domain", "VARCHAR", "NOT NULL UNIQUE"),
        ColumnDef::new("data", "BLOB", ""),
    ],
};

pub const CA_CERTS: TableDef = TableDef {
    name: "ca_certs",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("cert", "BLOB", "NOT NULL"),
        ColumnDef::new("expiry", "TIMESTAMP", "NOT NULL"),
        ColumnDef::new("bundle_id", "BIGINT", "NOT NULL"),
    ],
};

pub const ATTESTED_NODE_ENTRIES: TableDef = TableDef {
    name: "attested_node_entries",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("spiffe_id", "VARCHAR", "NOT NULL UNIQUE"),
        ColumnDef::new("data_type", "VARCHAR", ""),
        ColumnDef::new("serial_number", "VARCHAR", ""),
        ColumnDef::new("expires_at", "TIMESTAMP", ""),
    ],
};

pub const NODE_RESOLVER_MAP_ENTRIES: TableDef = TableDef {
    name: "node_resolver_map_entries",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("spiffe_id", "VARCHAR", "NOT NULL"),
        ColumnDef::new("type", "VARCHAR", "NOT NULL"),
        ColumnDef::new("value", "VARCHAR", "NOT NULL"),
    ],
};

pub const REGISTERED_ENTRIES: TableDef = TableDef {
    name: "registered_entries",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("entry_id", "VARCHAR", "NOT NULL UNIQUE"),
        ColumnDef::new("spiffe_id", "VARCHAR", "NOT NULL"),
        ColumnDef::new("parent_id", "VARCHAR", "NOT NULL"),
        ColumnDef::new("ttl", "INTEGER", ""),
    ],
};

pub const JOIN_TOKENS: TableDef = TableDef {
    name: "join_tokens",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("token", "VARCHAR", "NOT NULL UNIQUE"),
        ColumnDef::new("expiry", "BIGINT", ""),
    ],
};

pub const SELECTORS: TableDef = TableDef {
    name: "selectors",
    columns: &[
        ID,
        CREATED_AT,
        UPDATED_AT,
        ColumnDef::new("registered_entry_id", "BIGINT", "NOT NULL"),
        ColumnDef::new("type", "VARCHAR", "NOT NULL"),
        ColumnDef::new("value", "VARCHAR", "NOT NULL"),
    ],
};

/// The singleton version record.
pub const MIGRATIONS: TableDef = TableDef {
    name: VERSION_TABLE,
    columns: &[
        ID,
        ColumnDef::new("version", "BIGINT", "NOT NULL"),
        CREATED_AT,
        UPDATED_AT,
    ],
};

/// Every table of the current schema, in creation order.
pub const ALL_TABLES: &[TableDef] = &[
    BUNDLES,
    CA_CERTS,
    ATTESTED_NODE_ENTRIES,
    NODE_RESOLVER_MAP_ENTRIES,
    REGISTERED_ENTRIES,
    JOIN_TOKENS,
    SELECTORS,
    MIGRATIONS,
];
