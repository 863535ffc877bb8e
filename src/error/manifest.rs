//! Manifest and configuration errors

use super::RolloutError;

/// Creates a manifest parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> RolloutError {
    RolloutError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a configuration parse error
pub fn config_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> RolloutError {
    RolloutError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a script not found error
pub fn script_not_found(name: impl Into<String>) -> RolloutError {
    RolloutError::ScriptNotFound { name: name.into() }
}
