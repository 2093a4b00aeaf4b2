//! Schema migration runner.
//!
//! Brings a store from whatever version it holds up to the code version. A
//! pristine store is initialized directly at the code version; an existing
//! store is advanced one step at a time, each step and its version bump in
//! their own transaction.

use crate::bootstrap;
use crate::error::{MigrationError, MigrationResult};
use crate::registry::StepRegistry;
use crate::transaction::with_transaction;
use crate::version::{self, CODE_VERSION};
use ds_db::{Backend, Transaction};
use serde::Serialize;

/// What a successful [`MigrationRunner::migrate`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Pristine store created at the code version; no steps ran.
    Initialized { version: i64 },
    /// Store was already at the code version.
    UpToDate { version: i64 },
    /// Steps `from..to` were applied.
    Migrated {
        from: i64,
        to: i64,
        steps_applied: usize,
    },
}

/// Read-only view of where a store stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MigrationStatus {
    /// No entity tables yet; migrate would initialize at `code`.
    Fresh { code: i64 },
    /// Stored version equals the code version.
    UpToDate { version: i64 },
    /// Steps are pending. `missing_steps` lists source versions the registry
    /// cannot handle; migrate fails at the first of them.
    Pending {
        from: i64,
        to: i64,
        missing_steps: Vec<i64>,
    },
    /// Stored version is newer than the code; migrate refuses to run.
    Newer { stored: i64, code: i64 },
    /// Stored version is negative, which no step can advance; migrate fails
    /// with an unknown-step error.
    Malformed { stored: i64 },
}

/// Drives a store to `code_version` using the steps in a [`StepRegistry`].
pub struct MigrationRunner<'a> {
    backend: &'a dyn Backend,
    registry: StepRegistry,
    code_version: i64,
}

impl<'a> MigrationRunner<'a> {
    /// Runner over `backend` with an explicit step table and target version.
    pub fn new(backend: &'a dyn Backend, registry: StepRegistry, code_version: i64) -> Self {
        Self {
            backend,
            registry,
            code_version,
        }
    }

    /// Runner with the built-in steps at [`CODE_VERSION`].
    pub fn builtin(backend: &'a dyn Backend) -> Self {
        Self::new(backend, StepRegistry::builtin(), CODE_VERSION)
    }

    /// Version this runner migrates to.
    pub fn code_version(&self) -> i64 {
        self.code_version
    }

    /// Bring the store up to the code version.
    ///
    /// Stops at the first failure. A failed step leaves the store at the last
    /// committed version, so rerunning retries that same step.
    pub fn migrate(&self) -> MigrationResult<MigrationOutcome> {
        if bootstrap::is_new(self.backend)? {
            bootstrap::initialize(self.backend, self.code_version)?;
            return Ok(MigrationOutcome::Initialized {
                version: self.code_version,
            });
        }

        let start = with_transaction(
            self.backend,
            |tx| version::ensure_record(tx).map_err(MigrationError::Connectivity),
            MigrationError::Connectivity,
        )?;

        if start > self.code_version {
            let err = MigrationError::BackwardVersion {
                stored: start,
                code: self.code_version,
            };
            log::error!("{err}");
            return Err(err);
        }

        if start == self.code_version {
            log::debug!("schema version {start} matches code, no migration needed");
            return Ok(MigrationOutcome::UpToDate { version: start });
        }

        log::info!("running migrations...");
        let mut current = start;
        while current < self.code_version {
            current = with_transaction(
                self.backend,
                move |tx| self.migrate_version(tx, current),
                move |source| MigrationError::Commit {
                    version: current + 1,
                    source,
                },
            )?;
        }
        log::info!("done running migrations.");

        Ok(MigrationOutcome::Migrated {
            from: start,
            to: current,
            steps_applied: (current - start) as usize,
        })
    }

    /// Apply the step for `version` and bump the record, returning the new
    /// version. The caller commits or rolls back.
    fn migrate_version(&self, tx: &dyn Transaction, version: i64) -> MigrationResult<i64> {
        log::info!("migrating from version {version}");

        let step = self
            .registry
            .step_for(version)
            .ok_or(MigrationError::UnknownStep { version })?;

        (step.apply)(tx).map_err(|source| MigrationError::Transform {
            version,
            name: step.name,
            source,
        })?;

        let next = step.to_version();
        version::advance(tx, next)
            .map_err(|source| MigrationError::VersionWrite { version: next, source })?;
        Ok(next)
    }

    /// Report where the store stands without writing anything.
    pub fn status(&self) -> MigrationResult<MigrationStatus> {
        if bootstrap::is_new(self.backend)? {
            return Ok(MigrationStatus::Fresh {
                code: self.code_version,
            });
        }

        let tx = self.backend.begin().map_err(MigrationError::Connectivity)?;
        let stored = version::read_record(tx.as_ref()).map_err(MigrationError::Connectivity);
        if let Err(e) = tx.rollback() {
            log::warn!("rollback of status read failed: {e}");
        }
        let stored = stored?;

        if stored < 0 {
            return Ok(MigrationStatus::Malformed { stored });
        }

        let status = match stored.cmp(&self.code_version) {
            std::cmp::Ordering::Equal => MigrationStatus::UpToDate { version: stored },
            std::cmp::Ordering::Greater => MigrationStatus::Newer {
                stored,
                code: self.code_version,
            },
            std::cmp::Ordering::Less => MigrationStatus::Pending {
                from: stored,
                to: self.code_version,
                missing_steps: self.registry.missing_steps(stored, self.code_version),
            },
        };
        Ok(status)
    }
}

/// Migrate `backend` with the built-in steps to [`CODE_VERSION`].
///
/// Call once at startup, before serving; any error must abort startup.
pub fn migrate_datastore(backend: &dyn Backend) -> MigrationResult<MigrationOutcome> {
    MigrationRunner::builtin(backend).migrate()
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
