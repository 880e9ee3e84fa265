//! Core domain layer for nextq.
//!
//! This module contains pure logic with no I/O. Terminal and process access
//! are handled via ports (traits) defined in the application layer.
//!
//! ## Contents
//!
//! - **Questions**: [`Question`] and its per-kind structs
//! - **Answers**: [`Answer`] and the ordered [`AnswerSet`]
//! - **Commands**: [`CommandRequest`], [`RetryPolicy`], [`CommandOutcome`]
//! - **Selection**: [`SelectCursor`], the circular highlight used by arrow-key prompts
pub mod answer;
pub mod command;
pub mod error;
pub mod question;
pub mod select;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use answer::{Answer, AnswerSet};
pub use command::{CommandOutcome, CommandRequest, RetryPolicy};
pub use error::{DomainError, ErrorCategory};
pub use question::{Confirm, Filter, FreeText, Question, QuestionKind, SingleSelect, Validator};
pub use select::SelectCursor;
pub use validation::DomainValidator;
