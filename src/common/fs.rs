//! Common file system operations with unified error handling

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{self, Result, RolloutError};

/// Copy a directory recursively
///
/// A symlinked `src` is followed; symlinks found inside it are recreated as
/// links rather than copied through.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| RolloutError::IoError {
            message: format!("Failed to walk '{}': {e}", src.display()),
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if entry.depth() == 0 || file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| error::fs::io_error("Failed to create directory", &target, &e))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())
                .map_err(|e| error::fs::read_failed(entry.path(), &e))?;
            symlink(&link, &target).map_err(|e| error::fs::write_failed(&target, &e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| error::fs::write_failed(&target, &e))?;
        }
    }

    Ok(())
}

/// Remove a file, directory or symlink if it exists
pub fn remove_path(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Check whether anything (including a dangling symlink) exists at `path`
pub fn link_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create a symlink pointing at `target`
#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symlink pointing at `target`
#[cfg(windows)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link.parent().map_or_else(|| target.to_path_buf(), |p| p.join(target));
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
