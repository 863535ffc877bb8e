//! Version store errors

use miette::Diagnostic;

use super::RolloutError;

/// Creates a version not found error
pub fn not_found(target: impl Into<String>) -> RolloutError {
    RolloutError::VersionNotFound {
        target: target.into(),
    }
}

/// Creates an index out of range error
pub fn index_not_found(index: usize) -> RolloutError {
    RolloutError::VersionIndexNotFound { index }
}

/// Creates a duplicate identity error
pub fn already_installed(name: impl Into<String>, version: impl Into<String>) -> RolloutError {
    RolloutError::AlreadyInstalled {
        name: name.into(),
        version: version.into(),
    }
}

/// Creates an error for an attempt to remove the version in use
pub fn cannot_uninstall_current(id: impl Into<String>) -> RolloutError {
    RolloutError::CannotUninstallCurrent { id: id.into() }
}

/// Creates a store lock error
pub fn lock_failed(path: impl Into<String>, reason: impl Into<String>) -> RolloutError {
    RolloutError::StoreLockFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a per-version clean failure, keeping the cause's message and help
pub fn uninstall_failed(id: impl Into<String>, cause: &RolloutError) -> RolloutError {
    RolloutError::UninstallFailed {
        id: id.into(),
        reason: cause.to_string(),
        detail: cause.help().map(|help| help.to_string()),
    }
}
