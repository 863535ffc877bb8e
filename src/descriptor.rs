//! Deployment metadata read from a package manifest
//!
//! A package declares its deployment behaviour in the `rollout` section of
//! its `package.json`:
//!
//! ```json
//! {
//!   "name": "app",
//!   "version": "1.2.0",
//!   "scripts": { "migrate": "node migrate.js" },
//!   "rollout": {
//!     "hooks": { "preuse": "npm run migrate" },
//!     "scripts": ["migrate"],
//!     "compatibility": "^0.3"
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{self, Result};

/// Manifest filename inside a package
pub const MANIFEST_FILE: &str = "package.json";

/// Lifecycle transitions a package can attach a command to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Hook {
    Preinstall,
    Postinstall,
    Preuse,
    Postuse,
    Preuninstall,
    Postuninstall,
}

impl Hook {
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::Preinstall => "preinstall",
            Hook::Postinstall => "postinstall",
            Hook::Preuse => "preuse",
            Hook::Postuse => "postuse",
            Hook::Preuninstall => "preuninstall",
            Hook::Postuninstall => "postuninstall",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package identity as declared by the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub version: String,
}

/// Parsed deployment metadata of one package version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    /// Present whenever the package has a manifest
    pub identity: Option<Identity>,
    pub hooks: BTreeMap<Hook, String>,
    /// Surfaced script names mapped to their command text
    pub scripts: BTreeMap<String, String>,
    /// Semver range the running tool must satisfy
    pub compatibility: Option<String>,
}

impl Descriptor {
    /// Command bound to `hook`, if any
    pub fn hook(&self, hook: Hook) -> Option<&str> {
        self.hooks.get(&hook).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    scripts: BTreeMap<String, String>,
    #[serde(default)]
    rollout: Option<DeploySection>,
}

#[derive(Debug, Default, Deserialize)]
struct DeploySection {
    #[serde(default)]
    hooks: BTreeMap<Hook, String>,
    #[serde(default)]
    scripts: Vec<String>,
    #[serde(default)]
    compatibility: Option<String>,
}

/// Read the descriptor of the package staged or installed at `dir`
///
/// A missing manifest yields an empty descriptor.
pub fn read(dir: &Path) -> Result<Descriptor> {
    let path = dir.join(MANIFEST_FILE);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Descriptor::default()),
        Err(e) => return Err(error::fs::read_failed(&path, &e)),
    };

    let manifest: Manifest = serde_json::from_str(&content)
        .map_err(|e| error::manifest::parse_failed(path.display().to_string(), e.to_string()))?;

    Ok(from_manifest(manifest))
}

fn from_manifest(manifest: Manifest) -> Descriptor {
    let section = manifest.rollout.unwrap_or_default();

    let scripts = section
        .scripts
        .into_iter()
        .map(|name| {
            let command = manifest.scripts.get(&name).cloned().unwrap_or_default();
            (name, command)
        })
        .collect();

    Descriptor {
        identity: Some(Identity {
            name: manifest.name.unwrap_or_default(),
            version: manifest.version.unwrap_or_default(),
        }),
        hooks: section.hooks,
        scripts,
        compatibility: section.compatibility,
    }
}
