//! Subcommand handlers.
//!
//! Each handler translates parsed arguments into calls on `nextq-core`
//! services wired to `nextq-adapters`, then reports through
//! [`crate::output::OutputManager`].

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod run;
