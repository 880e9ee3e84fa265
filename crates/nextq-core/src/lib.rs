//! nextq Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the nextq
//! project setup tool: an interactive prompt engine and a retrying command
//! runner, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            nextq-cli (CLI)              │
//! │   (question list, step plan, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (PromptEngine, CommandRunner)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: Terminal, Theme, Shell)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     nextq-adapters (Infrastructure)     │
//! │ (ConsoleTerminal, SystemShell, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Question, AnswerSet, CommandRequest)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nextq_core::prelude::*;
//!
//! let questions: Vec<Question> = vec![
//!     Question::text("project_name", "Project name").default("my-app").into(),
//!     Question::confirm("use_typescript", "Use TypeScript?").default(true).into(),
//! ];
//!
//! // `terminal` implements `Terminal`, `shell` implements `Shell`.
//! let answers = PromptEngine::scoped(terminal, Box::new(PlainTheme), |engine| {
//!     engine.resolve(&questions)
//! })?;
//!
//! let runner = CommandRunner::new(Box::new(shell));
//! let outcome = runner.execute(&CommandRequest::new("npm install", "./my-app"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandRunner, PromptEngine, PromptError,
        ports::{Key, PlainTheme, RunnerEvent, Shell, ShellOutput, Terminal, Theme},
    };
    pub use crate::domain::{
        Answer, AnswerSet, CommandOutcome, CommandRequest, Question, QuestionKind, RetryPolicy,
    };
    pub use crate::error::{NextqError, NextqResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
