//! External process errors

use std::fmt;
use std::process::ExitStatus;

use super::RolloutError;

/// How a child process ended when it did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Code(i32),
    Signal(i32),
    Unknown,
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signal(signal);
            }
        }

        Termination::Unknown
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Code(code) => write!(f, "exit code: {code}"),
            Termination::Signal(signal) => write!(f, "signal: {signal}"),
            Termination::Unknown => write!(f, "unknown status"),
        }
    }
}

/// Creates a failed command error
pub fn command_failed(
    command: impl Into<String>,
    status: Termination,
    stderr: Option<String>,
) -> RolloutError {
    RolloutError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}
