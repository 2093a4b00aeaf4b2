//! Error types for the migration engine.

use ds_db::DbError;
use thiserror::Error;

/// Schema migration errors.
///
/// Every variant is terminal: the migration procedure stops at the first
/// error and the hosting process must not start serving.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The store could not be reached or queried (MG001).
    #[error("[MG001] Datastore query failed")]
    Connectivity(#[source] DbError),

    /// Stored version is newer than this binary (MG002).
    #[error("[MG002] backwards migration not supported! (current={stored}, code={code})")]
    BackwardVersion { stored: i64, code: i64 },

    /// No registered step advances the stored version (MG003).
    #[error("[MG003] no migration support for version {version}")]
    UnknownStep { version: i64 },

    /// A step transform failed and was rolled back (MG004).
    #[error("[MG004] migration '{name}' from version {version} failed")]
    Transform {
        version: i64,
        name: &'static str,
        #[source]
        source: DbError,
    },

    /// Writing the new version record failed and the step was rolled back (MG005).
    #[error("[MG005] failed to record schema version {version}")]
    VersionWrite {
        version: i64,
        #[source]
        source: DbError,
    },

    /// The step transaction could not be committed (MG006).
    #[error("[MG006] failed to commit migration to version {version}")]
    Commit {
        version: i64,
        #[source]
        source: DbError,
    },

    /// Creating the schema on a pristine store failed (MG007).
    #[error("[MG007] database initialization failed")]
    Initialize(#[source] DbError),

    /// The step table is malformed (MG008).
    #[error("[MG008] invalid migration registry: {0}")]
    InvalidRegistry(String),
}

/// Result type alias for [`MigrationError`].
pub type MigrationResult<T> = Result<T, MigrationError>;
