//! Transaction scoping for engine operations.

use crate::error::{MigrationError, MigrationResult};
use ds_db::{Backend, DbError, Transaction};

/// Execute `body` within a transaction, committing on success and rolling
/// back on error.
///
/// A failed `BEGIN` is a connectivity error; a failed `COMMIT` is mapped with
/// `on_commit_error`. A failed `ROLLBACK` is logged and the body's error is
/// returned.
pub(crate) fn with_transaction<T, F, C>(
    backend: &dyn Backend,
    body: F,
    on_commit_error: C,
) -> MigrationResult<T>
where
    F: FnOnce(&dyn Transaction) -> MigrationResult<T>,
    C: FnOnce(DbError) -> MigrationError,
{
    let tx = backend.begin().map_err(MigrationError::Connectivity)?;

    let result = body(tx.as_ref());
    match result {
        Ok(value) => {
            tx.commit().map_err(on_commit_error)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                log::warn!("rollback after failed migration work also failed: {rollback_err}");
            }
            Err(err)
        }
    }
}
