//! Command requests and their outcomes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::domain::error::DomainError;

/// How many times to try a command, and how long to wait in between.
///
/// The delay is constant; there is no exponential back-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A single attempt, no retries.
    pub const fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_attempts == 0 {
            return Err(DomainError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// One external command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
    pub working_dir: PathBuf,
    pub silent: bool,
    pub retry: RetryPolicy,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
            silent: false,
            retry: RetryPolicy::once(),
        }
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.command.trim().is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        self.retry.validate()
    }
}

/// Result of one (possibly retried) command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub attempts_used: u32,
    /// `None` when the process never started or was killed by a signal.
    pub exit_code: Option<i32>,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl CommandOutcome {
    /// Whether more than one attempt was needed.
    pub fn was_retried(&self) -> bool {
        self.attempts_used > 1
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
