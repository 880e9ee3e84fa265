//! Infrastructure adapters for nextq.
//!
//! This crate implements the ports defined in `nextq-core::application::ports`.
//! It contains all terminal and process I/O.

pub mod shell;
pub mod terminal;
pub mod theme;

// Re-export commonly used adapters
pub use shell::{ScriptedShell, SystemShell};
pub use terminal::{ConsoleTerminal, ScriptedTerminal};
pub use theme::{ColorTheme, theme_for};
