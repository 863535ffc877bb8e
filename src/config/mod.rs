//! Configuration file and option merging
//!
//! Options come from three layers, highest precedence first:
//! 1. Command line flags and their environment variables
//! 2. The YAML config file (`$ROLLOUT_CONFIG`, else `<config dir>/rollout/config.yaml`)
//! 3. Built-in defaults
//!
//! ```yaml
//! root: /srv/app
//! sync_mode: ci
//! disabled_hooks: [postinstall]
//! npm: /usr/local/bin/npm
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::deps::{DEFAULT_NPM, SyncMode};
use crate::descriptor::Hook;
use crate::error::{self, Result, RolloutError};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ROLLOUT_CONFIG";

const CONFIG_DIR: &str = "rollout";
const CONFIG_FILE: &str = "config.yaml";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub root: Option<PathBuf>,
    /// Kept as text so an unknown mode is reported with the valid ones
    pub sync_mode: Option<String>,
    pub disabled_hooks: Vec<Hook>,
    pub npm: Option<String>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the config file at `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(error::fs::read_failed(path, &e)),
        };

        Self::from_yaml(&content).map_err(|e| match e {
            RolloutError::ConfigParseFailed { reason, .. } => {
                error::manifest::config_parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Location of the config file
    ///
    /// Can be overridden with the `ROLLOUT_CONFIG` environment variable.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the config file from its default location
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub sync_mode: Option<SyncMode>,
    pub disabled_hooks: Vec<Hook>,
    pub npm: Option<String>,
}

/// Effective settings after merging every layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute store root
    pub root: PathBuf,
    pub sync_mode: SyncMode,
    /// Union of hooks disabled on the command line and in the config file
    pub disabled_hooks: BTreeSet<Hook>,
    pub npm: String,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: ConfigFile) -> Result<Self> {
        let root = overrides
            .root
            .or(file.root)
            .ok_or_else(|| RolloutError::MissingOption {
                name: "root".to_string(),
            })?;

        let sync_mode = match (overrides.sync_mode, file.sync_mode) {
            (Some(mode), _) => mode,
            (None, Some(mode)) => mode.parse()?,
            (None, None) => SyncMode::default(),
        };

        let disabled_hooks = overrides
            .disabled_hooks
            .into_iter()
            .chain(file.disabled_hooks)
            .collect();

        let npm = overrides
            .npm
            .or(file.npm)
            .unwrap_or_else(|| DEFAULT_NPM.to_string());

        Ok(Self {
            root: absolute_root(&root)?,
            sync_mode,
            disabled_hooks,
            npm,
        })
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.exists() {
        dunce::canonicalize(root).map_err(|e| error::fs::read_failed(root, &e))
    } else {
        std::path::absolute(root).map_err(|e| RolloutError::InvalidOption {
            name: "root".to_string(),
            value: root.display().to_string(),
            reason: e.to_string(),
        })
    }
}
