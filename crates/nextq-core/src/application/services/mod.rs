//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: resolving a list of
//! questions through a terminal, and running commands through a shell.

pub mod command_service;
pub mod prompt_service;

pub use command_service::CommandRunner;
pub use prompt_service::PromptEngine;
