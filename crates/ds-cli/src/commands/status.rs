//! Status command implementation

use anyhow::{Context, Result};
use ds_migrate::{MigrationRunner, MigrationStatus};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::open_datastore;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let db = open_datastore(global)?;
    let status = MigrationRunner::builtin(&db)
        .status()
        .context("Failed to read datastore schema version")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", describe(&status));
    }
    Ok(())
}

fn describe(status: &MigrationStatus) -> String {
    match status {
        MigrationStatus::Fresh { code } => {
            format!("Datastore is empty; migrate will initialize it at version {code}")
        }
        MigrationStatus::UpToDate { version } => format!("Datastore is at schema version {version}"),
        MigrationStatus::Pending {
            from,
            to,
            missing_steps,
        } if missing_steps.is_empty() => {
            format!(
                "Datastore is at version {from}; {} step(s) pending to reach {to}",
                to.abs_diff(*from)
            )
        }
        MigrationStatus::Pending {
            from,
            to,
            missing_steps,
        } => format!(
            "Datastore is at version {from}; cannot reach {to}: no migration for version(s) {missing_steps:?}"
        ),
        MigrationStatus::Newer { stored, code } => format!(
            "Datastore is at version {stored}, newer than this build ({code}); upgrade the binary"
        ),
        MigrationStatus::Malformed { stored } => format!(
            "Datastore holds malformed schema version {stored}; it cannot be migrated"
        ),
    }
}
