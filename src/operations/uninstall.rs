//! Uninstall operation
//!
//! Pipeline: lock, resolve, check compatibility, refuse the current
//! version, `preuninstall`, remove the directory, `postuninstall`.

use crate::compat;
use crate::descriptor::Hook;
use crate::error::{self, Result};
use crate::store::StoreGuard;

use super::{Orchestrator, RunOptions};

/// Removes one non-current version
pub struct UninstallOperation<'a> {
    rollout: &'a Orchestrator,
    options: &'a RunOptions,
}

impl<'a> UninstallOperation<'a> {
    pub fn new(rollout: &'a Orchestrator, options: &'a RunOptions) -> Self {
        Self { rollout, options }
    }

    /// Returns the id of the removed version
    pub fn execute(&self, target: &str) -> Result<String> {
        let guard = self.rollout.lock()?;
        let id = self.rollout.store().resolve(target)?;
        self.remove_locked(&id, &guard)?;
        Ok(id)
    }

    /// Remove `id` under a lock the caller already holds
    pub(crate) fn remove_locked(&self, id: &str, _guard: &StoreGuard) -> Result<()> {
        let store = self.rollout.store();
        let version = store.get(id)?;

        compat::check(self.rollout.tool_version(), &version.descriptor)?;

        if version.is_current {
            return Err(error::store::cannot_uninstall_current(id));
        }

        let hooks = self.options.hook_runner(store.root());
        hooks.run(
            Hook::Preuninstall,
            version.descriptor.hook(Hook::Preuninstall),
            &version.path,
        )?;

        store.remove(id)?;

        hooks.run(
            Hook::Postuninstall,
            version.descriptor.hook(Hook::Postuninstall),
            store.root(),
        )?;

        Ok(())
    }
}
