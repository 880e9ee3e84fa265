//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (terminal,
//! process spawning), not invalid question or command configuration. Those
//! are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while prompting.
///
/// Invalid user input is never one of these: it is re-prompted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// The user pressed Ctrl-C while a prompt was waiting.
    #[error("Prompt interrupted")]
    Interrupted,

    /// Standard input reached end-of-file before an answer was accepted.
    #[error("Input closed before all questions were answered")]
    InputClosed,

    /// The engine was used after its input resource was released.
    #[error("Prompt engine is closed")]
    Closed,

    /// Reading from or writing to the terminal failed.
    #[error("Terminal error: {reason}")]
    Terminal { reason: String },
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// A child process could not be started at all.
    #[error("Failed to start '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Prompt(PromptError::Interrupted) => vec![
                "Setup was cancelled".into(),
                "No commands were run".into(),
            ],
            Self::Prompt(PromptError::InputClosed) => vec![
                "Standard input ended before every question was answered".into(),
                "Pipe one answer per line, or run with --yes to accept defaults".into(),
            ],
            Self::Prompt(PromptError::Terminal { .. }) => vec![
                "Check that the terminal is usable".into(),
                "Try running with --no-color or from a different terminal".into(),
            ],
            Self::SpawnFailed { command, .. } => vec![
                format!("Could not start: {}", command),
                "Ensure the program is installed and in your PATH".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Prompt(PromptError::Interrupted) => ErrorCategory::Interrupted,
            Self::Prompt(PromptError::InputClosed) => ErrorCategory::Validation,
            Self::Prompt(PromptError::Closed) => ErrorCategory::Internal,
            Self::Prompt(PromptError::Terminal { .. }) => ErrorCategory::Internal,
            Self::SpawnFailed { .. } => ErrorCategory::Internal,
        }
    }
}
