//! Package source errors

use super::RolloutError;

/// Creates a missing source error
pub fn not_found(path: impl Into<String>) -> RolloutError {
    RolloutError::SourceNotFound { path: path.into() }
}

/// Creates an invalid source error
pub fn invalid(reference: impl Into<String>, reason: impl Into<String>) -> RolloutError {
    RolloutError::InvalidSource {
        reference: reference.into(),
        reason: reason.into(),
    }
}

/// Creates a download error
pub fn download_failed(url: impl Into<String>, reason: impl Into<String>) -> RolloutError {
    RolloutError::DownloadFailed {
        url: url.into(),
        reason: reason.into(),
    }
}
