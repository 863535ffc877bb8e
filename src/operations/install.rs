//! Install operation
//!
//! Pipeline: lock, clear staging, acquire, read descriptor, check
//! compatibility, reject duplicates, sync dependencies, `preinstall`,
//! commit, activate (when asked), `postinstall`, clear staging.
//!
//! A failure after the commit leaves the committed version in the store.

use crate::compat;
use crate::deps::{DEFAULT_NPM, DependencySync, SyncMode};
use crate::descriptor::{self, Descriptor, Hook};
use crate::error::{self, Result};
use crate::source::{Credentials, SourceAcquirer, SourceRef, Staging};
use crate::store::InstalledVersion;

use super::{Orchestrator, RunOptions};

/// Configuration options for install
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Install even when a version with the same identity exists
    pub force: bool,
    /// Point the store at the new version once committed
    pub activate: bool,
    pub sync_mode: SyncMode,
    /// Dependency manager command
    pub npm: String,
    /// Basic-auth credentials for remote sources
    pub auth: Option<Credentials>,
    pub run: RunOptions,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            force: false,
            activate: false,
            sync_mode: SyncMode::default(),
            npm: DEFAULT_NPM.to_string(),
            auth: None,
            run: RunOptions::default(),
        }
    }
}

/// Installs one package source as a new version
pub struct InstallOperation<'a> {
    rollout: &'a Orchestrator,
    options: &'a InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(rollout: &'a Orchestrator, options: &'a InstallOptions) -> Self {
        Self { rollout, options }
    }

    pub fn execute(&self, source: &str) -> Result<InstalledVersion> {
        let store = self.rollout.store();
        let root = store.root();
        let _guard = self.rollout.lock()?;

        let staging = Staging::new(root);
        tracing::info!("Clean temporary files and directories");
        staging.clear();

        let source = SourceRef::parse(source);
        let staged = SourceAcquirer::new(&staging, self.options.auth.as_ref()).acquire(&source)?;

        tracing::info!("Read package info from {}", staged.display());
        let descriptor = descriptor::read(&staged)?;

        compat::check(self.rollout.tool_version(), &descriptor)?;

        if !self.options.force {
            self.check_duplicate(&descriptor)?;
        }

        let activator = self.rollout.activator();
        let sync = DependencySync::new(
            &self.options.npm,
            self.options.sync_mode,
            self.options.run.verbose,
        );
        if let Some(current) = activator.current()? {
            sync.seed(&current.path, &staged)?;
        }
        sync.sync(&staged)?;

        let hooks = self.options.run.hook_runner(root);
        hooks.run(Hook::Preinstall, descriptor.hook(Hook::Preinstall), &staged)?;

        activator.ensure_layout()?;
        let id = store.commit(&staged)?;

        if self.options.activate {
            tracing::info!("Switch to new package");
            activator.activate(&id)?;
        }

        let version = store.get(&id)?;
        hooks.run(
            Hook::Postinstall,
            version.descriptor.hook(Hook::Postinstall),
            &version.path,
        )?;

        staging.clear();
        Ok(version)
    }

    fn check_duplicate(&self, descriptor: &Descriptor) -> Result<()> {
        let Some(identity) = &descriptor.identity else {
            return Ok(());
        };

        let installed = self.rollout.store().list()?;
        if installed
            .iter()
            .any(|version| version.descriptor.identity.as_ref() == Some(identity))
        {
            return Err(error::store::already_installed(
                &identity.name,
                &identity.version,
            ));
        }

        Ok(())
    }
}
