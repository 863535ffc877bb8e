//! File system errors

use std::path::Path;

use super::RolloutError;

/// Creates a file read error
pub fn read_failed(path: &Path, err: &std::io::Error) -> RolloutError {
    RolloutError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: &Path, err: &std::io::Error) -> RolloutError {
    RolloutError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error with operation context
pub fn io_error(operation: &str, path: &Path, err: &std::io::Error) -> RolloutError {
    RolloutError::IoError {
        message: format!("{operation} '{}': {err}", path.display()),
    }
}
