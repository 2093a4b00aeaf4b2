//! Migrate command implementation

use anyhow::{Context, Result};
use ds_db::Backend;
use ds_migrate::{MigrationOutcome, MigrationRunner};

use crate::cli::GlobalArgs;
use crate::commands::common::open_datastore;

/// Execute the migrate command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let db = open_datastore(global)?;
    let outcome = run(&db)?;
    println!("{}", describe(&outcome));
    Ok(())
}

/// Run the built-in migrations against `backend`.
pub(crate) fn run(backend: &dyn Backend) -> Result<MigrationOutcome> {
    MigrationRunner::builtin(backend)
        .migrate()
        .with_context(|| format!("Schema migration of {} datastore failed", backend.db_type()))
}

fn describe(outcome: &MigrationOutcome) -> String {
    match outcome {
        MigrationOutcome::Initialized { version } => {
            format!("Initialized new datastore at schema version {version}")
        }
        MigrationOutcome::UpToDate { version } => {
            format!("Datastore already at schema version {version}")
        }
        MigrationOutcome::Migrated {
            from,
            to,
            steps_applied,
        } => format!("Migrated datastore from version {from} to {to} ({steps_applied} step(s))"),
    }
}
