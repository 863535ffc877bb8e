//! Error types and handling for rollout
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`store`]: Version store and current pointer errors
//! - [`source`]: Package source errors
//! - [`manifest`]: Manifest and configuration parsing errors
//! - [`process`]: External process (hooks, dependency manager) errors
//! - [`fs`]: File system errors

pub mod fs;
pub mod manifest;
pub mod process;
pub mod source;
pub mod store;

pub use process::Termination;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rollout operations
#[derive(Error, Diagnostic, Debug)]
pub enum RolloutError {
    // Option errors
    #[error("Option '{name}' is required")]
    #[diagnostic(
        code(rollout::options::missing),
        help("Pass it on the command line, via the environment, or in the config file")
    )]
    MissingOption { name: String },

    #[error("Invalid value '{value}' for option '{name}': {reason}")]
    #[diagnostic(code(rollout::options::invalid))]
    InvalidOption {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Expected sync mode '{mode}' to be one of: install, ci")]
    #[diagnostic(code(rollout::options::sync_mode))]
    InvalidSyncMode { mode: String },

    // Store errors
    #[error("Version '{target}' is not found")]
    #[diagnostic(
        code(rollout::store::not_found),
        help("Run 'rollout list' to see installed versions")
    )]
    VersionNotFound { target: String },

    #[error("Version with index {index} is not found")]
    #[diagnostic(
        code(rollout::store::index_not_found),
        help("Indexes count from 0, newest version first")
    )]
    VersionIndexNotFound { index: usize },

    #[error("No version is currently in use")]
    #[diagnostic(
        code(rollout::store::no_current),
        help("Run 'rollout use <version>' to activate one")
    )]
    NoCurrentVersion,

    #[error("Version with name '{name}' and version '{version}' is already installed")]
    #[diagnostic(
        code(rollout::store::already_installed),
        help("Pass --force to install it again")
    )]
    AlreadyInstalled { name: String, version: String },

    #[error("Cannot uninstall current version '{id}'")]
    #[diagnostic(
        code(rollout::store::uninstall_current),
        help("Switch to another version with 'rollout use' first")
    )]
    CannotUninstallCurrent { id: String },

    #[error("Failed to lock store at '{path}': {reason}")]
    #[diagnostic(code(rollout::store::lock_failed))]
    StoreLockFailed { path: String, reason: String },

    #[error("Failed to uninstall {count} version(s)")]
    #[diagnostic(code(rollout::store::clean_failed))]
    CleanFailed {
        count: usize,
        #[related]
        errors: Vec<RolloutError>,
    },

    #[error("Failed to uninstall version '{id}': {reason}")]
    #[diagnostic(code(rollout::store::uninstall_failed))]
    UninstallFailed {
        id: String,
        reason: String,
        #[help]
        detail: Option<String>,
    },

    // Compatibility errors
    #[error(
        "Current rollout version '{tool_version}' doesn't satisfy version required by package: '{range}'"
    )]
    #[diagnostic(
        code(rollout::compat::unsatisfied),
        help("Upgrade rollout or install a package built for this release")
    )]
    Incompatible { tool_version: String, range: String },

    #[error("Invalid compatibility range '{range}': {reason}")]
    #[diagnostic(code(rollout::compat::invalid_range))]
    InvalidCompatibilityRange { range: String, reason: String },

    // Source errors
    #[error("Package source '{path}' does not exist")]
    #[diagnostic(code(rollout::source::not_found))]
    SourceNotFound { path: String },

    #[error("Invalid package source '{reference}': {reason}")]
    #[diagnostic(
        code(rollout::source::invalid),
        help("Valid sources: a package directory, a .tar.gz archive, or an http(s) URL")
    )]
    InvalidSource { reference: String, reason: String },

    #[error("Failed to download '{url}': {reason}")]
    #[diagnostic(code(rollout::source::download_failed))]
    DownloadFailed { url: String, reason: String },

    // Manifest and configuration errors
    #[error("Failed to parse manifest '{path}': {reason}")]
    #[diagnostic(code(rollout::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Failed to parse configuration file '{path}': {reason}")]
    #[diagnostic(code(rollout::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Script '{name}' is not found")]
    #[diagnostic(
        code(rollout::manifest::script_not_found),
        help("Run 'rollout scripts' to see available scripts")
    )]
    ScriptNotFound { name: String },

    // External process errors
    #[error("Command \"{command}\" failed with {status}")]
    #[diagnostic(code(rollout::process::failed))]
    CommandFailed {
        command: String,
        status: Termination,
        #[help]
        stderr: Option<String>,
    },

    #[error("Neither npm-shrinkwrap.json nor package-lock.json found in '{path}'")]
    #[diagnostic(
        code(rollout::process::lock_artifact_missing),
        help("Sync mode 'ci' installs from a lock artifact; use sync mode 'install' instead")
    )]
    LockArtifactNotFound { path: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(rollout::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(rollout::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rollout::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for RolloutError {
    fn from(err: std::io::Error) -> Self {
        RolloutError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RolloutError {
    fn from(err: serde_json::Error) -> Self {
        RolloutError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RolloutError {
    fn from(err: serde_yaml::Error) -> Self {
        RolloutError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RolloutError {
    fn from(err: inquire::InquireError) -> Self {
        RolloutError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RolloutError>;
