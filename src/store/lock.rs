//! Advisory store locking
//!
//! Mutating operations hold `<root>/.rollout.lock` for their whole
//! duration. The lock file records the holder's PID so a waiting process
//! can say who it is waiting for.
//!
//! Hooks run while the lock is held. They see the holder's PID in
//! `ROLLOUT_LOCK_HOLDER`, and a nested mutating command started from a hook
//! fails at once instead of waiting for its own parent.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use crate::error::{self, Result};

/// Lock file name under the store root
pub const LOCK_FILE: &str = ".rollout.lock";

/// Environment variable naming the PID that holds the lock around a hook
pub const HOLDER_ENV: &str = "ROLLOUT_LOCK_HOLDER";

/// RAII guard for store locking
///
/// Acquires an advisory file lock on creation and releases it on drop.
#[derive(Debug)]
pub struct StoreGuard {
    lock: LockFile,
    path: PathBuf,
}

impl StoreGuard {
    /// Acquire the lock, blocking while another process holds it
    pub fn acquire(root: &Path) -> Result<Self> {
        let path = root.join(LOCK_FILE);

        let mut lock = LockFile::open(&path).map_err(|e| {
            error::store::lock_failed(
                path.display().to_string(),
                format!("Failed to open lock file: {e}"),
            )
        })?;

        let acquired = lock.try_lock_with_pid().map_err(|e| {
            error::store::lock_failed(path.display().to_string(), e.to_string())
        })?;

        if !acquired {
            let holder = holder(&path);
            if env::var(HOLDER_ENV).is_ok_and(|pid| pid == holder) {
                return Err(error::store::lock_failed(
                    path.display().to_string(),
                    format!(
                        "Store is locked by process {holder} which is running this hook; \
                         hooks cannot change their own store"
                    ),
                ));
            }
            tracing::warn!(
                "Store {} is locked by process {}, waiting",
                root.display(),
                holder
            );
            lock.lock_with_pid().map_err(|e| {
                error::store::lock_failed(path.display().to_string(), e.to_string())
            })?;
        }

        tracing::debug!("Acquired store lock {}", path.display());
        Ok(Self { lock, path })
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
        tracing::debug!("Released store lock {}", self.path.display());
    }
}

fn holder(path: &Path) -> String {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
