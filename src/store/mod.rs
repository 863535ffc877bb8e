//! Versioned package store
//!
//! ## Store Structure
//!
//! ```text
//! <root>/
//! ├── packages/
//! │   ├── 20261017-093015-042/   # One full copy per installed version
//! │   └── 20261016-181200-007/
//! ├── package -> packages/20261017-093015-042
//! ├── package.json -> package/package.json
//! └── .rollout.lock              # Advisory lock file
//! ```

pub mod id;
pub mod lock;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::activator;
use crate::common::fs::remove_path;
use crate::descriptor::{self, Descriptor};
use crate::error::{self, Result};

pub use lock::StoreGuard;

/// Installed versions subdirectory
pub const PACKAGES_DIR: &str = "packages";

/// One installed version of the package
#[derive(Debug, Clone)]
pub struct InstalledVersion {
    pub id: String,
    pub path: PathBuf,
    pub descriptor: Descriptor,
    pub is_current: bool,
}

/// Collection of installed versions under one root
#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
    packages_dir: PathBuf,
}

impl VersionStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            packages_dir: root.join(PACKAGES_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    pub fn version_path(&self, id: &str) -> PathBuf {
        self.packages_dir.join(id)
    }

    /// Installed version ids, newest first
    pub fn ids(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.packages_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(error::fs::read_failed(&self.packages_dir, &e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| error::fs::read_failed(&self.packages_dir, &e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }
            ids.push(name);
        }

        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    /// All installed versions, newest first, with the current one marked
    pub fn list(&self) -> Result<Vec<InstalledVersion>> {
        let ids = self.ids()?;
        let current = activator::pointer_target(&self.root);

        ids.par_iter()
            .map(|id| self.load(id, current.as_deref()))
            .collect()
    }

    /// A single installed version
    pub fn get(&self, id: &str) -> Result<InstalledVersion> {
        let current = activator::pointer_target(&self.root);
        self.load(id, current.as_deref())
    }

    fn load(&self, id: &str, current: Option<&str>) -> Result<InstalledVersion> {
        let path = self.version_path(id);
        if !path.is_dir() {
            return Err(error::store::not_found(id));
        }

        Ok(InstalledVersion {
            id: id.to_string(),
            descriptor: descriptor::read(&path)?,
            path,
            is_current: current == Some(id),
        })
    }

    /// Move a staged package into the store under a fresh id
    pub fn commit(&self, staged: &Path) -> Result<String> {
        fs::create_dir_all(&self.packages_dir).map_err(|e| {
            error::fs::io_error("Failed to create directory", &self.packages_dir, &e)
        })?;

        let ids = self.ids()?;
        let id = id::next_id(ids.first().map(String::as_str), chrono::Utc::now());
        let target = self.version_path(&id);

        tracing::info!("Move package to {}", target.display());
        fs::rename(staged, &target).map_err(|e| error::fs::io_error("Failed to move", staged, &e))?;

        Ok(id)
    }

    /// Delete a version's directory
    ///
    /// Callers make sure `id` is not the current version.
    pub fn remove(&self, id: &str) -> Result<()> {
        let path = self.version_path(id);
        if !path.is_dir() {
            return Err(error::store::not_found(id));
        }

        tracing::info!("Remove package folder {}", path.display());
        remove_path(&path).map_err(|e| error::fs::io_error("Failed to remove", &path, &e))
    }

    /// Resolve a user-supplied token to a version id
    ///
    /// An exact id wins; a number is a zero-based index into the
    /// newest-first listing.
    pub fn resolve(&self, token: &str) -> Result<String> {
        let ids = self.ids()?;

        if ids.iter().any(|id| id == token) {
            return Ok(token.to_string());
        }

        if let Ok(index) = token.parse::<usize>() {
            return ids
                .get(index)
                .cloned()
                .ok_or_else(|| error::store::index_not_found(index));
        }

        Err(error::store::not_found(token))
    }
}
