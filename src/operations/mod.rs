//! Version lifecycle operations
//!
//! The [`Orchestrator`] is the entry point for every pipeline over one store:
//! - [`InstallOperation`]: acquire, verify, sync, commit, optionally activate
//! - [`UseOperation`]: switch the current pointer
//! - [`UninstallOperation`]: remove one non-current version
//! - [`CleanOperation`]: remove every non-current version
//!
//! Mutating pipelines hold the store lock for their whole duration.

pub mod clean;
pub mod install;
pub mod uninstall;
pub mod use_version;

pub use clean::{CleanOperation, CleanOptions};
pub use install::{InstallOperation, InstallOptions};
pub use uninstall::UninstallOperation;
pub use use_version::UseOperation;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::activator::Activator;
use crate::descriptor::Hook;
use crate::error::{self, Result, RolloutError};
use crate::hooks::{self, HookRunner};
use crate::process;
use crate::store::{InstalledVersion, StoreGuard, VersionStore};

/// Options shared by every pipeline that runs hooks
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Hooks to skip even when the package declares them
    pub disabled_hooks: BTreeSet<Hook>,
    /// Stream child process output instead of capturing it
    pub verbose: bool,
}

impl RunOptions {
    pub(crate) fn hook_runner<'a>(&'a self, root: &'a Path) -> HookRunner<'a> {
        HookRunner::new(root, &self.disabled_hooks, self.verbose)
    }
}

/// Runs lifecycle pipelines against one store root
#[derive(Debug, Clone)]
pub struct Orchestrator {
    store: VersionStore,
    tool_version: String,
}

impl Orchestrator {
    /// `tool_version` is checked against each package's compatibility range
    pub fn new(root: &Path, tool_version: impl Into<String>) -> Self {
        Self {
            store: VersionStore::new(root),
            tool_version: tool_version.into(),
        }
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn activator(&self) -> Activator<'_> {
        Activator::new(&self.store)
    }

    /// Take the store lock, creating the root if needed
    pub(crate) fn lock(&self) -> Result<StoreGuard> {
        let root = self.store.root();
        fs::create_dir_all(root)
            .map_err(|e| error::fs::io_error("Failed to create directory", root, &e))?;
        StoreGuard::acquire(root)
    }

    pub fn install(&self, source: &str, options: &InstallOptions) -> Result<InstalledVersion> {
        InstallOperation::new(self, options).execute(source)
    }

    /// Returns `false` when the target was already current
    pub fn use_version(&self, target: &str, options: &RunOptions) -> Result<bool> {
        UseOperation::new(self, options).execute(target)
    }

    /// Returns the id of the removed version
    pub fn uninstall(&self, target: &str, options: &RunOptions) -> Result<String> {
        UninstallOperation::new(self, options).execute(target)
    }

    /// Returns the ids of the removed versions
    pub fn clean(&self, options: &CleanOptions) -> Result<Vec<String>> {
        CleanOperation::new(self, options).execute()
    }

    pub fn resolve(&self, target: &str) -> Result<String> {
        self.store.resolve(target)
    }

    pub fn list(&self) -> Result<Vec<InstalledVersion>> {
        self.store.list()
    }

    pub fn current(&self) -> Result<Option<InstalledVersion>> {
        self.activator().current()
    }

    /// Details of `target`, or of the current version when no target is given
    pub fn info(&self, target: Option<&str>) -> Result<InstalledVersion> {
        match target {
            Some(target) => {
                let id = self.store.resolve(target)?;
                self.store.get(&id)
            }
            None => self.current()?.ok_or(RolloutError::NoCurrentVersion),
        }
    }

    /// Run a surfaced script of the current version in its directory
    pub fn run_script(&self, name: &str, options: &RunOptions) -> Result<()> {
        let current = self.current()?.ok_or(RolloutError::NoCurrentVersion)?;

        let command = current
            .descriptor
            .scripts
            .get(name)
            .filter(|command| !command.is_empty())
            .ok_or_else(|| error::manifest::script_not_found(name))?;

        tracing::info!("Run script '{}' of {}", name, current.id);
        let envs = hooks::environment(self.store.root(), &current.path)?;
        process::run_shell(command, &current.path, &envs, options.verbose)
    }
}
