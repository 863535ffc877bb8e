//! Command implementations for the rollout CLI

pub mod clean;
pub mod completions;
pub mod info;
pub mod install;
pub mod list;
pub mod resolve;
pub mod scripts;
pub mod uninstall;
pub mod use_version;
pub mod version;

use std::path::PathBuf;

use crate::cli::HookArgs;
use crate::config::{ConfigFile, Overrides, Settings};
use crate::error::Result;
use crate::operations::{Orchestrator, RunOptions};

/// Resolved settings and the orchestrator for one store
pub struct Context {
    pub settings: Settings,
    pub rollout: Orchestrator,
    pub verbose: bool,
}

impl Context {
    /// Merge command line values with the config file and open the store
    pub fn load(root: Option<PathBuf>, verbose: bool, overrides: Overrides) -> Result<Self> {
        let overrides = Overrides { root, ..overrides };
        let settings = Settings::resolve(overrides, ConfigFile::load_default()?)?;
        tracing::debug!("Using store root {}", settings.root.display());

        let rollout = Orchestrator::new(&settings.root, env!("CARGO_PKG_VERSION"));
        Ok(Self {
            settings,
            rollout,
            verbose,
        })
    }

    /// Context for commands that take no option besides the root
    pub fn open(root: Option<PathBuf>, verbose: bool) -> Result<Self> {
        Self::load(root, verbose, Overrides::default())
    }

    /// Hook options with the command's `--disable-hook` values applied
    pub fn run_options(&self, hooks: &HookArgs) -> RunOptions {
        let mut disabled_hooks = self.settings.disabled_hooks.clone();
        disabled_hooks.extend(hooks.disabled_hooks.iter().copied());
        RunOptions {
            disabled_hooks,
            verbose: self.verbose,
        }
    }
}
