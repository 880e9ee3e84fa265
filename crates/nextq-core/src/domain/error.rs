// ============================================================================
// domain/error.rs - QUESTION AND COMMAND INVARIANTS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (an outcome may be reported more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Question configuration errors
    // ========================================================================
    #[error("Question key must not be empty")]
    EmptyKey,

    #[error("Question '{key}' has no options to choose from")]
    EmptyOptions { key: String },

    #[error("Default '{default}' of question '{key}' is not one of its options")]
    DefaultNotAnOption { key: String, default: String },

    #[error("Question key '{key}' is used more than once")]
    DuplicateKey { key: String },

    // ========================================================================
    // Answer set constraints
    // ========================================================================
    #[error("Answer for '{key}' is already set")]
    AnswerAlreadySet { key: String },

    // ========================================================================
    // Command request errors
    // ========================================================================
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy { reason: String },

    #[error("Command must not be empty")]
    EmptyCommand,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyOptions { key } => vec![
                format!("Question '{}' was built without options", key),
                "Check the option list passed to the select question".into(),
            ],
            Self::DefaultNotAnOption { key, default } => vec![
                format!("'{}' is not listed for '{}'", default, key),
                "Use one of the listed options as the default, or remove it".into(),
            ],
            Self::DuplicateKey { key } => vec![
                format!("Two questions share the key '{}'", key),
                "Give every question a unique key".into(),
            ],
            Self::InvalidRetryPolicy { .. } => vec![
                "Attempts must be at least 1".into(),
                "Check runner.max_attempts in your configuration".into(),
            ],
            Self::EmptyCommand => vec!["Pass a non-empty command string".into()],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyKey
            | Self::EmptyOptions { .. }
            | Self::DefaultNotAnOption { .. }
            | Self::DuplicateKey { .. }
            | Self::InvalidRetryPolicy { .. } => ErrorCategory::Configuration,
            Self::EmptyCommand => ErrorCategory::Validation,
            Self::AnswerAlreadySet { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
