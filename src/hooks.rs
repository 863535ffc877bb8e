//! Lifecycle hook execution
//!
//! Hooks run through the shell with the package directory as working
//! directory. The child sees the caller's environment plus:
//! - `ROLLOUT_ROOT`: the store root
//! - `ROLLOUT_PACKAGE_PATH`: the working directory
//! - `<working dir>/node_modules/.bin` prepended to `PATH`
//! - `ROLLOUT_LOCK_HOLDER`: this process's PID, since hooks run under the
//!   store lock

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::path::Path;

use crate::descriptor::Hook;
use crate::error::{Result, RolloutError};
use crate::process;
use crate::store::lock::HOLDER_ENV;

/// Environment variable carrying the store root
pub const ROOT_ENV: &str = "ROLLOUT_ROOT";

/// Environment variable carrying the hook working directory
pub const PACKAGE_PATH_ENV: &str = "ROLLOUT_PACKAGE_PATH";

/// Build the environment overlay for a command running in `cwd`
pub fn environment(root: &Path, cwd: &Path) -> Result<Vec<(&'static str, OsString)>> {
    let local_bin = cwd.join("node_modules").join(".bin");
    let inherited = env::var_os("PATH").unwrap_or_default();
    let search_path = env::join_paths(
        std::iter::once(local_bin).chain(env::split_paths(&inherited)),
    )
    .map_err(|e| RolloutError::IoError {
        message: format!("Failed to build PATH for '{}': {e}", cwd.display()),
    })?;

    Ok(vec![
        (ROOT_ENV, root.as_os_str().to_os_string()),
        (PACKAGE_PATH_ENV, cwd.as_os_str().to_os_string()),
        ("PATH", search_path),
    ])
}

/// Runs hooks for one pipeline
pub struct HookRunner<'a> {
    root: &'a Path,
    disabled: &'a BTreeSet<Hook>,
    verbose: bool,
}

impl<'a> HookRunner<'a> {
    pub fn new(root: &'a Path, disabled: &'a BTreeSet<Hook>, verbose: bool) -> Self {
        Self {
            root,
            disabled,
            verbose,
        }
    }

    /// Run `hook` if the package declares it and it isn't disabled
    pub fn run(&self, hook: Hook, command: Option<&str>, cwd: &Path) -> Result<()> {
        let Some(command) = command else {
            return Ok(());
        };

        if self.disabled.contains(&hook) {
            tracing::warn!("Skipping disabled {} hook", hook);
            return Ok(());
        }

        tracing::info!("Exec {} hook", hook);

        let mut envs = environment(self.root, cwd)?;
        envs.push((HOLDER_ENV, std::process::id().to_string().into()));
        process::run_shell(command, cwd, &envs, self.verbose)
    }
}
