//! Versioned schema migration engine for the datastore.
//!
//! Brings a relational store up to the schema version this build expects:
//! a pristine store is created directly at [`CODE_VERSION`], an existing one
//! is walked forward through the registered steps, one transaction per step.
//! Run [`migrate_datastore`] once at startup and refuse to serve on error.

pub mod bootstrap;
pub mod error;
pub mod migration;
pub mod registry;
pub mod schema;
pub mod steps;
pub(crate) mod transaction;
pub mod version;

pub use error::{MigrationError, MigrationResult};
pub use migration::{migrate_datastore, MigrationOutcome, MigrationRunner, MigrationStatus};
pub use registry::{MigrationStep, StepFn, StepRegistry};
pub use version::CODE_VERSION;
