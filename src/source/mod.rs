//! Package source acquisition
//!
//! Stages a package's files under the store root before they are committed:
//! - Local directory: `./build/app`, `/srv/releases/app` (copied recursively)
//! - Local archive: `./app-1.0.0.tgz` (npm-pack layout, extracted)
//! - Remote archive: `https://ci.example.com/app-1.0.0.tgz` (downloaded, extracted)
//!
//! ## Staging Layout
//!
//! ```text
//! <root>/
//! ├── package.new.tar.gz   # Archive being extracted
//! └── package.new/
//!     └── package/         # Staged package files
//! ```

pub mod archive;
pub mod remote;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::common::fs::{copy_dir_recursive, remove_path};
use crate::error::{self, Result, RolloutError};

/// Staging directory name under the store root
pub const STAGING_DIR: &str = "package.new";

/// Staged archive name under the store root
pub const STAGING_ARCHIVE: &str = "package.new.tar.gz";

/// Top-level directory of a staged or archived package
pub const PACKAGE_DIR: &str = "package";

/// A parsed package source reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Directory or archive on the local file system
    Local(PathBuf),
    /// Archive served over http(s)
    Remote(String),
}

impl SourceRef {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with("http://") || input.starts_with("https://") {
            SourceRef::Remote(input.to_string())
        } else {
            SourceRef::Local(PathBuf::from(input))
        }
    }
}

/// Basic-auth credentials for remote sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Parse `user:password`
    pub fn parse(input: &str) -> Result<Self> {
        match input.split_once(':') {
            Some((user, password)) if !user.is_empty() => Ok(Self {
                user: user.to_string(),
                password: password.to_string(),
            }),
            _ => Err(RolloutError::InvalidOption {
                name: "auth".to_string(),
                value: input.to_string(),
                reason: "expected user:password".to_string(),
            }),
        }
    }
}

/// Fixed staging paths of one store root
#[derive(Debug, Clone)]
pub struct Staging {
    pub dir: PathBuf,
    pub archive: PathBuf,
}

impl Staging {
    pub fn new(root: &Path) -> Self {
        Self {
            dir: root.join(STAGING_DIR),
            archive: root.join(STAGING_ARCHIVE),
        }
    }

    /// Directory holding the staged package files
    pub fn package_dir(&self) -> PathBuf {
        self.dir.join(PACKAGE_DIR)
    }

    /// Remove staging residue, logging instead of failing
    pub fn clear(&self) {
        for path in [&self.archive, &self.dir] {
            if let Err(e) = remove_path(path) {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}

/// Stages package files from a source reference
pub struct SourceAcquirer<'a> {
    staging: &'a Staging,
    auth: Option<&'a Credentials>,
}

impl<'a> SourceAcquirer<'a> {
    pub fn new(staging: &'a Staging, auth: Option<&'a Credentials>) -> Self {
        Self { staging, auth }
    }

    /// Stage `source` and return the staged package directory
    pub fn acquire(&self, source: &SourceRef) -> Result<PathBuf> {
        let package_dir = self.staging.package_dir();

        match source {
            SourceRef::Remote(url) => {
                tracing::info!("Download remote package from {}", url);
                remote::download(url, &self.staging.archive, self.auth)?;
            }
            SourceRef::Local(path) => {
                tracing::info!("Copy local package from {}", path.display());
                self.stage_local(path, &package_dir)?;
            }
        }

        if self.staging.archive.is_file() {
            tracing::info!("Package is a tarball archive, extract it");
            archive::extract(&self.staging.archive, &self.staging.dir)?;
            remove_path(&self.staging.archive)
                .map_err(|e| error::fs::io_error("Failed to remove", &self.staging.archive, &e))?;
        }

        if !package_dir.is_dir() {
            return Err(error::source::invalid(
                source_display(source),
                format!("archive has no top-level '{PACKAGE_DIR}' directory"),
            ));
        }

        Ok(package_dir)
    }

    fn stage_local(&self, path: &Path, package_dir: &Path) -> Result<()> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(error::source::not_found(path.display().to_string()));
            }
            Err(e) => return Err(error::fs::read_failed(path, &e)),
        };

        if metadata.is_dir() {
            copy_dir_recursive(path, package_dir)
        } else if metadata.is_file() {
            fs::copy(path, &self.staging.archive)
                .map(|_| ())
                .map_err(|e| error::fs::write_failed(&self.staging.archive, &e))
        } else {
            Err(error::source::invalid(
                path.display().to_string(),
                "neither a file nor a directory",
            ))
        }
    }
}

fn source_display(source: &SourceRef) -> String {
    match source {
        SourceRef::Local(path) => path.display().to_string(),
        SourceRef::Remote(url) => url.clone(),
    }
}
