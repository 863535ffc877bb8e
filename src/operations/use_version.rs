//! Use operation
//!
//! Pipeline: lock, resolve, check compatibility, `preuse`, swap the
//! pointer, `postuse`. Using the current version runs no hooks.

use crate::compat;
use crate::descriptor::Hook;
use crate::error::Result;

use super::{Orchestrator, RunOptions};

/// Switches the current pointer to an installed version
pub struct UseOperation<'a> {
    rollout: &'a Orchestrator,
    options: &'a RunOptions,
}

impl<'a> UseOperation<'a> {
    pub fn new(rollout: &'a Orchestrator, options: &'a RunOptions) -> Self {
        Self { rollout, options }
    }

    /// Returns `false` when the target was already current
    pub fn execute(&self, target: &str) -> Result<bool> {
        let store = self.rollout.store();
        let _guard = self.rollout.lock()?;

        let id = store.resolve(target)?;
        let version = store.get(&id)?;

        compat::check(self.rollout.tool_version(), &version.descriptor)?;

        if version.is_current {
            tracing::info!("Version '{}' is already in use", id);
            return Ok(false);
        }

        let hooks = self.options.hook_runner(store.root());
        hooks.run(
            Hook::Preuse,
            version.descriptor.hook(Hook::Preuse),
            &version.path,
        )?;

        tracing::info!("Switch to version '{}'", id);
        self.rollout.activator().activate(&id)?;

        hooks.run(
            Hook::Postuse,
            version.descriptor.hook(Hook::Postuse),
            &version.path,
        )?;

        Ok(true)
    }
}
