//! Clean operation
//!
//! Uninstalls every version except the current one, oldest last, under a
//! single store lock. The first failure stops the run unless `keep_going`
//! is set, in which case failures are collected into one error.

use crate::error::{self, Result, RolloutError};

use super::{Orchestrator, RunOptions, UninstallOperation};

/// Configuration options for clean
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Continue past failed versions and report them together
    pub keep_going: bool,
    pub run: RunOptions,
}

/// Removes every non-current version
pub struct CleanOperation<'a> {
    rollout: &'a Orchestrator,
    options: &'a CleanOptions,
}

impl<'a> CleanOperation<'a> {
    pub fn new(rollout: &'a Orchestrator, options: &'a CleanOptions) -> Self {
        Self { rollout, options }
    }

    /// Returns the ids of the removed versions
    pub fn execute(&self) -> Result<Vec<String>> {
        let guard = self.rollout.lock()?;
        let uninstall = UninstallOperation::new(self.rollout, &self.options.run);

        let targets: Vec<String> = self
            .rollout
            .store()
            .list()?
            .into_iter()
            .filter(|version| !version.is_current)
            .map(|version| version.id)
            .collect();

        let mut removed = Vec::with_capacity(targets.len());
        let mut errors = Vec::new();

        for id in targets {
            tracing::info!("Uninstall version '{}'", id);
            match uninstall.remove_locked(&id, &guard) {
                Ok(()) => removed.push(id),
                Err(e) if self.options.keep_going => {
                    tracing::warn!("Failed to uninstall '{}': {}", id, e);
                    errors.push(error::store::uninstall_failed(&id, &e));
                }
                Err(e) => return Err(e),
            }
        }

        if errors.is_empty() {
            Ok(removed)
        } else {
            Err(RolloutError::CleanFailed {
                count: errors.len(),
                errors,
            })
        }
    }
}
