//! Ordered table of migration steps.
//!
//! A [`StepRegistry`] maps each source version to the step that advances the
//! store to the next version. It is an immutable value handed to the runner;
//! the built-in table lives in [`crate::steps`].

use crate::error::{MigrationError, MigrationResult};
use crate::steps::BUILTIN_STEPS;
use ds_db::{DbResult, Transaction};
use std::fmt;

/// Upper bound on the versions [`StepRegistry::missing_steps`] reports.
pub const MISSING_STEPS_LIMIT: usize = 16;

/// Transform applied inside the step's transaction.
pub type StepFn = fn(&dyn Transaction) -> DbResult<()>;

/// One migration step: advances the store from `from_version` to
/// `from_version + 1`.
///
/// Once released, a step must never change. New behavior goes into a new
/// step with a higher source version.
#[derive(Clone, Copy)]
pub struct MigrationStep {
    /// Version the step applies to
    pub from_version: i64,
    /// Human-readable name for logs and errors
    pub name: &'static str,
    /// The transform
    pub apply: StepFn,
}

impl MigrationStep {
    /// Create a step advancing `from_version` by one.
    pub const fn new(from_version: i64, name: &'static str, apply: StepFn) -> Self {
        Self {
            from_version,
            name,
            apply,
        }
    }

    /// Version the store holds after this step.
    pub fn to_version(&self) -> i64 {
        self.from_version + 1
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from_version", &self.from_version)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Steps keyed by source version, kept sorted ascending.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<MigrationStep>,
}

impl StepRegistry {
    /// Build a registry from an explicit list of steps.
    ///
    /// Fails if two steps share a source version.
    pub fn new(mut steps: Vec<MigrationStep>) -> MigrationResult<Self> {
        steps.sort_by_key(|s| s.from_version);
        if let Some(dup) = steps
            .windows(2)
            .find(|w| w[0].from_version == w[1].from_version)
        {
            return Err(MigrationError::InvalidRegistry(format!(
                "steps '{}' and '{}' both migrate from version {}",
                dup[0].name, dup[1].name, dup[0].from_version
            )));
        }
        Ok(Self { steps })
    }

    /// The steps shipped with this build.
    pub fn builtin() -> Self {
        debug_assert!(
            BUILTIN_STEPS
                .windows(2)
                .all(|w| w[0].from_version < w[1].from_version),
            "BUILTIN_STEPS must be strictly ascending"
        );
        Self {
            steps: BUILTIN_STEPS.to_vec(),
        }
    }

    /// Exact-match lookup on the source version.
    pub fn step_for(&self, version: i64) -> Option<&MigrationStep> {
        self.steps
            .binary_search_by_key(&version, |s| s.from_version)
            .ok()
            .map(|idx| &self.steps[idx])
    }

    /// Source versions in `from..to` with no registered step, lowest first,
    /// at most [`MISSING_STEPS_LIMIT`] of them.
    pub fn missing_steps(&self, from: i64, to: i64) -> Vec<i64> {
        (from..to)
            .filter(|v| self.step_for(*v).is_none())
            .take(MISSING_STEPS_LIMIT)
            .collect()
    }

    /// Check that every version in `0..code_version` has a step and that no
    /// step migrates from `code_version` or beyond.
    pub fn validate(&self, code_version: i64) -> MigrationResult<()> {
        let missing = self.missing_steps(0, code_version);
        if !missing.is_empty() {
            return Err(MigrationError::InvalidRegistry(format!(
                "no step for version(s) {missing:?} below code version {code_version}"
            )));
        }
        if let Some(beyond) = self.steps.iter().find(|s| s.from_version >= code_version) {
            return Err(MigrationError::InvalidRegistry(format!(
                "step '{}' migrates from version {} but code version is {code_version}",
                beyond.name, beyond.from_version
            )));
        }
        Ok(())
    }

    /// Steps in ascending source-version order.
    pub fn iter(&self) -> impl Iterator<Item = &MigrationStep> {
        self.steps.iter()
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::CODE_VERSION;

    fn noop(_tx: &dyn Transaction) -> DbResult<()> {
        Ok(())
    }

    #[test]
    fn builtin_covers_code_version() {
        let registry = StepRegistry::builtin();
        registry.validate(CODE_VERSION).unwrap();
        assert_eq!(registry.len() as i64, CODE_VERSION);
    }

    #[test]
    fn builtin_table_is_strictly_ascending() {
        assert!(BUILTIN_STEPS
            .windows(2)
            .all(|w| w[0].from_version < w[1].from_version));
        let checked = StepRegistry::new(BUILTIN_STEPS.to_vec()).unwrap();
        let builtin = StepRegistry::builtin();
        let checked_versions: Vec<_> = checked.iter().map(|s| s.from_version).collect();
        let builtin_versions: Vec<_> = builtin.iter().map(|s| s.from_version).collect();
        assert_eq!(builtin_versions, checked_versions);
    }

    #[test]
    fn missing_steps_is_bounded() {
        let registry = StepRegistry::new(vec![MigrationStep::new(0, "a", noop)]).unwrap();
        let missing = registry.missing_steps(i64::MIN, 1);
        assert_eq!(missing.len(), MISSING_STEPS_LIMIT);
        assert_eq!(missing[0], i64::MIN);
        assert_eq!(registry.missing_steps(-3, 3), vec![-3, -2, -1, 1, 2]);
    }

    #[test]
    fn new_sorts_steps() {
        let registry = StepRegistry::new(vec![
            MigrationStep::new(2, "c", noop),
            MigrationStep::new(0, "a", noop),
            MigrationStep::new(1, "b", noop),
        ])
        .unwrap();
        let names: Vec<_> = registry.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn new_rejects_duplicate_source_version() {
        let err = StepRegistry::new(vec![
            MigrationStep::new(0, "first", noop),
            MigrationStep::new(0, "second", noop),
        ])
        .unwrap_err();
        assert!(matches!(err, MigrationError::InvalidRegistry(_)));
        assert!(err.to_string().contains("first"));
    }

    #[test]
    fn step_for_is_exact_match() {
        let registry = StepRegistry::new(vec![
            MigrationStep::new(0, "a", noop),
            MigrationStep::new(2, "c", noop),
        ])
        .unwrap();
        assert_eq!(registry.step_for(0).unwrap().name, "a");
        assert_eq!(registry.step_for(2).unwrap().to_version(), 3);
        assert!(registry.step_for(1).is_none());
        assert!(registry.step_for(-1).is_none());
        assert!(registry.step_for(3).is_none());
    }

    #[test]
    fn validate_reports_gaps() {
        let registry = StepRegistry::new(vec![
            MigrationStep::new(0, "a", noop),
            MigrationStep::new(2, "c", noop),
        ])
        .unwrap();
        assert_eq!(registry.missing_steps(0, 3), vec![1]);
        let err = registry.validate(3).unwrap_err();
        assert!(err.to_string().contains("[1]"), "{err}");
    }

    #[test]
    fn validate_rejects_steps_beyond_code_version() {
        let registry = StepRegistry::new(vec![
            MigrationStep::new(0, "a", noop),
            MigrationStep::new(1, "b", noop),
        ])
        .unwrap();
        assert!(registry.validate(1).is_err());
        registry.validate(2).unwrap();
    }

    #[test]
    fn empty_registry() {
        let registry = StepRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        registry.validate(0).unwrap();
        assert!(registry.validate(1).is_err());
    }
}
