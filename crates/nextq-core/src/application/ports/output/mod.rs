//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nextq-adapters` crate provides implementations.

use std::time::Duration;

use crate::domain::CommandRequest;
use crate::error::NextqResult;

// ── Terminal ──────────────────────────────────────────────────────────────────

/// A keystroke delivered while in key-capture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    /// Ctrl-C.
    Interrupt,
    /// Anything the prompts do not react to.
    Other,
}

/// Port for terminal I/O.
///
/// Implemented by:
/// - `nextq_adapters::terminal::ConsoleTerminal` (production)
/// - `nextq_adapters::terminal::ScriptedTerminal` (testing)
///
/// ## Design Notes
///
/// - The implementation owns the standard-input reader. It may acquire it
///   lazily, but must drop it in [`Terminal::release`].
/// - `release` must be idempotent.
/// - Key-capture mode is entered and left only through the engine's scoped
///   guard, never directly by prompt code.
pub trait Terminal {
    /// Whether arrow-key navigation is possible (a live terminal on both ends).
    fn is_interactive(&self) -> bool;

    /// Write `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> NextqResult<()>;

    /// Write `prompt` without a newline and flush.
    fn write_prompt(&mut self, prompt: &str) -> NextqResult<()>;

    /// Read one line of input without its terminator. `None` on end-of-file.
    fn read_line(&mut self) -> NextqResult<Option<String>>;

    /// Read a single keystroke. Only called in key-capture mode.
    fn read_key(&mut self) -> NextqResult<Key>;

    /// Erase the last `count` written lines and move the cursor up.
    fn clear_lines(&mut self, count: usize) -> NextqResult<()>;

    fn enter_key_capture(&mut self) -> NextqResult<()>;

    fn leave_key_capture(&mut self) -> NextqResult<()>;

    /// Release the input resource and restore terminal state.
    fn release(&mut self) -> NextqResult<()>;
}

// ── Theme ─────────────────────────────────────────────────────────────────────

/// Port for prompt styling.
///
/// Every method has a plain-text default; [`PlainTheme`] uses them as-is.
/// `nextq_adapters::theme::ColorTheme` overrides them with ANSI styling.
pub trait Theme: Send + Sync {
    /// Question line, e.g. `? Project name (default: my-app) `.
    fn question(&self, message: &str, hint: Option<&str>) -> String {
        match hint {
            Some(hint) => format!("? {message} {hint} "),
            None => format!("? {message} "),
        }
    }

    /// One line of an arrow-key option list.
    fn option(&self, label: &str, highlighted: bool) -> String {
        if highlighted {
            format!("> {label}")
        } else {
            format!("  {label}")
        }
    }

    /// One line of a numbered option list.
    fn numbered_option(&self, number: usize, label: &str, is_default: bool) -> String {
        if is_default {
            format!("  {number}) {label} (default)")
        } else {
            format!("  {number}) {label}")
        }
    }

    /// Prompt shown before reading a numbered choice.
    fn answer_prompt(&self) -> String {
        "  Answer: ".to_string()
    }

    /// Line left behind after an arrow-key selection is committed.
    fn answered(&self, message: &str, value: &str) -> String {
        format!("? {message} > {value}")
    }

    /// Re-prompt message for rejected input.
    fn error(&self, message: &str) -> String {
        format!("  {message}")
    }
}

/// Unstyled theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {}

// ── Shell ─────────────────────────────────────────────────────────────────────

/// What one attempt of a command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Progress notifications from the command runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerEvent {
    /// An attempt is about to start.
    Started {
        command: String,
        attempt: u32,
        silent: bool,
    },
    /// An attempt failed and another will follow after `delay`.
    RetryScheduled {
        attempt: u32,
        max_attempts: u32,
        delay: Duration,
    },
}

/// Port for running one attempt of an external command.
///
/// Implemented by:
/// - `nextq_adapters::shell::SystemShell` (production)
/// - `nextq_adapters::shell::ScriptedShell` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Shell: Send + Sync {
    /// Run `request.command` once in `request.working_dir`.
    ///
    /// Output is captured when `request.silent`, passed through otherwise.
    /// An `Err` means the process could not be started.
    fn spawn(&self, request: &CommandRequest) -> NextqResult<ShellOutput>;

    /// Surface runner progress to the user. Default: nothing.
    fn notify(&self, _event: &RunnerEvent) {}
}
