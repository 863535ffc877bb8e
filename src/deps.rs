//! Dependency synchronization through the external dependency manager

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::common::fs::copy_dir_recursive;
use crate::descriptor::MANIFEST_FILE;
use crate::error::{Result, RolloutError};
use crate::process;

/// Dependency manager invoked when none is configured
pub const DEFAULT_NPM: &str = "npm";

const SHRINKWRAP_FILE: &str = "npm-shrinkwrap.json";
const PACKAGE_LOCK_FILE: &str = "package-lock.json";
const NODE_MODULES_DIR: &str = "node_modules";

/// How dependencies are brought in line with the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SyncMode {
    /// Incremental install followed by a prune
    #[default]
    Install,
    /// Clean reinstall from the lock artifact
    Ci,
}

impl FromStr for SyncMode {
    type Err = RolloutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "install" => Ok(SyncMode::Install),
            "ci" => Ok(SyncMode::Ci),
            _ => Err(RolloutError::InvalidSyncMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Install => f.write_str("install"),
            SyncMode::Ci => f.write_str("ci"),
        }
    }
}

/// Synchronizes `node_modules` of a package directory
pub struct DependencySync<'a> {
    npm: &'a str,
    mode: SyncMode,
    verbose: bool,
}

impl<'a> DependencySync<'a> {
    pub fn new(npm: &'a str, mode: SyncMode, verbose: bool) -> Self {
        Self { npm, mode, verbose }
    }

    /// Run the dependency manager in `dir`
    pub fn sync(&self, dir: &Path) -> Result<()> {
        if !dir.join(MANIFEST_FILE).is_file() {
            tracing::debug!("No {} in {}, nothing to sync", MANIFEST_FILE, dir.display());
            return Ok(());
        }

        let commands = match self.mode {
            SyncMode::Install => vec![
                format!("{} install --production", self.npm),
                format!("{} prune --production", self.npm),
            ],
            SyncMode::Ci => {
                if !dir.join(SHRINKWRAP_FILE).is_file() && !dir.join(PACKAGE_LOCK_FILE).is_file()
                {
                    return Err(RolloutError::LockArtifactNotFound {
                        path: dir.display().to_string(),
                    });
                }
                vec![format!("{} ci --production", self.npm)]
            }
        };

        for command in &commands {
            tracing::info!("Sync dependencies: {}", command);
            process::run_shell(command, dir, &[], self.verbose)?;
        }

        Ok(())
    }

    /// Copy `node_modules` of the version in use into a staged package
    ///
    /// Only done for incremental syncs and only when the staged package
    /// doesn't ship its own `node_modules`. Returns whether anything was copied.
    pub fn seed(&self, current: &Path, staged: &Path) -> Result<bool> {
        let source = current.join(NODE_MODULES_DIR);
        let target = staged.join(NODE_MODULES_DIR);

        if self.mode != SyncMode::Install || !source.is_dir() || target.exists() {
            return Ok(false);
        }

        tracing::info!("Copy node_modules from {}", current.display());
        copy_dir_recursive(&source, &target)?;
        Ok(true)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn package_dir(temp: &TempDir) -> std::path::PathBuf {
        let dir = temp.path().join("pkg");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), r#"{"name": "x", "version": "1.0.0"}"#).unwrap();
        dir
    }

    #[test]
    fn test_sync_mode_from_str() {
        assert_eq!("install".parse::<SyncMode>().unwrap(), SyncMode::Install);
        assert_eq!("ci".parse::<SyncMode>().unwrap(), SyncMode::Ci);

        let err = "invalidSyncMode".parse::<SyncMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected sync mode 'invalidSyncMode' to be one of: install, ci"
        );
    }

    #[test]
    fn test_install_mode_runs_install_then_prune() {
        let temp = TempDir::new().unwrap();
        let dir = package_dir(&temp);
        let log = temp.path().join("calls.log");
        let npm = format!("echo >> {}", log.display());

        DependencySync::new(&npm, SyncMode::Install, false)
            .sync(&dir)
            .unwrap();

        let calls = fs::read_to_string(&log).unwrap();
        let calls: Vec<&str> = calls.lines().collect();
        assert_eq!(calls, vec!["install --production", "prune --production"]);
    }

    #[test]
    fn test_ci_mode_requires_lock_artifact() {
        let temp = TempDir::new().unwrap();
        let dir = package_dir(&temp);

        let err = DependencySync::new("true", SyncMode::Ci, false)
            .sync(&dir)
            .unwrap_err();
        assert!(matches!(err, RolloutError::LockArtifactNotFound { .. }));
    }

    #[test]
    fn test_ci_mode_with_shrinkwrap() {
        let temp = TempDir::new().unwrap();
        let dir = package_dir(&temp);
        fs::write(dir.join(SHRINKWRAP_FILE), "{}").unwrap();
        let log = temp.path().join("calls.log");
        let npm = format!("echo >> {}", log.display());

        DependencySync::new(&npm, SyncMode::Ci, false)
            .sync(&dir)
            .unwrap();

        assert_eq!(fs::read_to_string(&log).unwrap().trim(), "ci --production");
    }

    #[test]
    fn test_failure_is_surfaced() {
        let temp = TempDir::new().unwrap();
        let dir = package_dir(&temp);

        let err = DependencySync::new("false", SyncMode::Install, false)
            .sync(&dir)
            .unwrap_err();
        assert!(matches!(err, RolloutError::CommandFailed { .. }));
        assert!(err.to_string().contains("false install --production"));
    }

    #[test]
    fn test_no_manifest_skips_sync() {
        let temp = TempDir::new().unwrap();
        assert!(
            DependencySync::new("false", SyncMode::Install, false)
                .sync(temp.path())
                .is_ok()
        );
    }

    #[test]
    fn test_seed_copies_current_node_modules() {
        let temp = TempDir::new().unwrap();
        let current = temp.path().join("current");
        fs::create_dir_all(current.join("node_modules/dep")).unwrap();
        fs::write(current.join("node_modules/dep/index.js"), "dep").unwrap();
        let staged = temp.path().join("staged");
        fs::create_dir_all(&staged).unwrap();

        let sync = DependencySync::new("true", SyncMode::Install, false);
        assert!(sync.seed(&current, &staged).unwrap());
        assert!(staged.join("node_modules/dep/index.js").is_file());

        // staged node_modules now exists, so a second seed is skipped
        assert!(!sync.seed(&current, &staged).unwrap());
    }

    #[test]
    fn test_seed_skipped_in_ci_mode() {
        let temp = TempDir::new().unwrap();
        let current = temp.path().join("current");
        fs::create_dir_all(current.join("node_modules")).unwrap();
        let staged = temp.path().join("staged");
        fs::create_dir_all(&staged).unwrap();

        let sync = DependencySync::new("true", SyncMode::Ci, false);
        assert!(!sync.seed(&current, &staged).unwrap());
        assert!(!staged.join("node_modules").exists());
    }
}
