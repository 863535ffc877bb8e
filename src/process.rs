//! Child process execution for hooks and the dependency manager

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{self, Result, RolloutError};

/// Build a command that runs `command` through the platform shell
fn shell(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

/// Run a shell command in `cwd` with extra environment variables
///
/// In verbose mode the child's output goes straight to the terminal,
/// otherwise stdout is discarded and stderr is captured for the error.
pub fn run_shell(
    command: &str,
    cwd: &Path,
    envs: &[(&str, OsString)],
    verbose: bool,
) -> Result<()> {
    let mut cmd = shell(command);
    cmd.current_dir(cwd).stdin(Stdio::null());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    tracing::debug!("Running '{}' in {}", command, cwd.display());

    let spawn_error = |e: std::io::Error| RolloutError::IoError {
        message: format!("Failed to run command \"{command}\": {e}"),
    };

    let (status, stderr) = if verbose {
        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(spawn_error)?;
        (status, None)
    } else {
        let output = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(spawn_error)?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        (output.status, Some(stderr))
    };

    if status.success() {
        Ok(())
    } else {
        Err(error::process::command_failed(
            command,
            status.into(),
            stderr,
        ))
    }
}
