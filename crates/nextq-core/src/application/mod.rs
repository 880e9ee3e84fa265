//! Application layer for nextq.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PromptEngine, CommandRunner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CommandRunner, PromptEngine};

// Re-export port traits (for adapter implementation)
pub use ports::{Key, PlainTheme, RunnerEvent, Shell, ShellOutput, Terminal, Theme};

pub use error::{ApplicationError, PromptError};
