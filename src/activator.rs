//! Current version pointer
//!
//! The version in use is whatever `<root>/package` links to. The link is
//! relative (`packages/<id>`) so the whole store can be moved.
//! Swapping creates the new link under a temporary name and renames it
//! over the old one, so readers always see either the old or the new target.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::{link_exists, remove_path, symlink};
use crate::descriptor::MANIFEST_FILE;
use crate::error::{self, Result};
use crate::source::PACKAGE_DIR;
use crate::store::{InstalledVersion, PACKAGES_DIR, VersionStore};

/// Name of the current pointer under the store root
pub const POINTER: &str = PACKAGE_DIR;

/// Convenience link to the current manifest under the store root
pub const MANIFEST_LINK: &str = MANIFEST_FILE;

/// Id the current pointer names, without checking that it exists
pub fn pointer_target(root: &Path) -> Option<String> {
    let target = fs::read_link(root.join(POINTER)).ok()?;
    target.file_name()?.to_str().map(str::to_string)
}

/// Reads and swaps the current pointer of one store
pub struct Activator<'a> {
    store: &'a VersionStore,
}

impl<'a> Activator<'a> {
    pub fn new(store: &'a VersionStore) -> Self {
        Self { store }
    }

    fn pointer(&self) -> PathBuf {
        self.store.root().join(POINTER)
    }

    /// The version in use, if any
    ///
    /// A pointer whose target is gone counts as no current version.
    pub fn current(&self) -> Result<Option<InstalledVersion>> {
        let Some(id) = pointer_target(self.store.root()) else {
            return Ok(None);
        };

        if !self.store.version_path(&id).is_dir() {
            tracing::warn!(
                "Current pointer {} refers to missing version '{}'",
                self.pointer().display(),
                id
            );
            return Ok(None);
        }

        self.store.get(&id).map(Some)
    }

    /// Point the store at `id`
    ///
    /// Returns `false` when `id` was already current.
    pub fn activate(&self, id: &str) -> Result<bool> {
        if pointer_target(self.store.root()).as_deref() == Some(id)
            && self.store.version_path(id).is_dir()
        {
            tracing::debug!("Version '{}' is already current", id);
            return Ok(false);
        }

        let pointer = self.pointer();
        let staged_link = self
            .store
            .root()
            .join(format!(".{POINTER}.{}.tmp", std::process::id()));
        let target = Path::new(PACKAGES_DIR).join(id);

        remove_path(&staged_link)
            .map_err(|e| error::fs::io_error("Failed to remove", &staged_link, &e))?;
        symlink(&target, &staged_link)
            .map_err(|e| error::fs::io_error("Failed to create link", &staged_link, &e))?;

        #[cfg(windows)]
        remove_path(&pointer).map_err(|e| error::fs::io_error("Failed to remove", &pointer, &e))?;

        tracing::info!("Point {} to {}", pointer.display(), target.display());
        if let Err(e) = fs::rename(&staged_link, &pointer) {
            let _ = remove_path(&staged_link);
            return Err(error::fs::io_error("Failed to swap", &pointer, &e));
        }

        Ok(true)
    }

    /// Create the packages directory and the manifest convenience link
    pub fn ensure_layout(&self) -> Result<()> {
        let packages_dir = self.store.packages_dir();
        fs::create_dir_all(packages_dir)
            .map_err(|e| error::fs::io_error("Failed to create directory", packages_dir, &e))?;

        let manifest_link = self.store.root().join(MANIFEST_LINK);
        if !link_exists(&manifest_link) {
            tracing::debug!("Create link {}", manifest_link.display());
            symlink(&Path::new(POINTER).join(MANIFEST_FILE), &manifest_link)
                .map_err(|e| error::fs::io_error("Failed to create link", &manifest_link, &e))?;
        }

        Ok(())
    }
}
