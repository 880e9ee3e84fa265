//! Terminal adapter backed by the `console` crate and standard input.

use std::io::{self, BufRead, IsTerminal, StdinLock};

use console::Term;
use tracing::debug;

use nextq_core::{
    application::{PromptError, ports::Key, ports::Terminal},
    error::NextqResult,
};

/// Lines remembered for [`Terminal::clear_lines`]; a select redraw never
/// clears more than its question plus options.
const WIDTH_HISTORY: usize = 64;

/// Production terminal: writes to stdout, reads lines from stdin.
///
/// The stdin lock is taken on the first line read and dropped in
/// [`Terminal::release`], so nothing else in the process can read stdin
/// while prompts are active.
pub struct ConsoleTerminal {
    term: Term,
    stdin: Option<StdinLock<'static>>,
    interactive: bool,
    cursor_hidden: bool,
    released: bool,
    /// Visible width of each recent `write_line`, oldest first.
    widths: Vec<usize>,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term() && io::stdin().is_terminal();
        Self {
            term,
            stdin: None,
            interactive,
            cursor_hidden: false,
            released: false,
            widths: Vec::new(),
        }
    }

    /// Force numbered-list selection even on a live terminal.
    pub fn without_key_navigation(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn remember_width(&mut self, line: &str) {
        if self.widths.len() == WIDTH_HISTORY {
            self.widths.remove(0);
        }
        self.widths.push(console::measure_text_width(line));
    }

    /// Rows covered by the last `count` written lines, forgetting them.
    /// Lines older than the history count as one row each.
    fn take_rows(&mut self, count: usize, columns: usize) -> usize {
        let start = self.widths.len().saturating_sub(count);
        let unknown = count - (self.widths.len() - start);
        let rows = physical_rows(&self.widths[start..], columns) + unknown;
        self.widths.truncate(start);
        rows
    }

    fn stdin(&mut self) -> NextqResult<&mut StdinLock<'static>> {
        if self.released {
            return Err(PromptError::Closed.into());
        }
        Ok(self.stdin.get_or_insert_with(|| io::stdin().lock()))
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ConsoleTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn write_line(&mut self, line: &str) -> NextqResult<()> {
        self.remember_width(line);
        self.term.write_line(line).map_err(terminal_error)
    }

    fn write_prompt(&mut self, prompt: &str) -> NextqResult<()> {
        self.term.write_str(prompt).map_err(terminal_error)?;
        self.term.flush().map_err(terminal_error)
    }

    fn read_line(&mut self) -> NextqResult<Option<String>> {
        let mut buf = String::new();
        let read = self.stdin()?.read_line(&mut buf).map_err(terminal_error)?;
        if read == 0 {
            return Ok(None);
        }

        let line = buf.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }

    fn read_key(&mut self) -> NextqResult<Key> {
        match self.term.read_key() {
            Ok(console::Key::ArrowUp) => Ok(Key::Up),
            Ok(console::Key::ArrowDown) => Ok(Key::Down),
            Ok(console::Key::Enter) => Ok(Key::Enter),
            Ok(console::Key::CtrlC) => Ok(Key::Interrupt),
            Ok(_) => Ok(Key::Other),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Key::Interrupt),
            Err(e) => Err(terminal_error(e)),
        }
    }

    /// Clears the last `count` lines, counting the extra rows a line takes
    /// when it is wider than the terminal.
    fn clear_lines(&mut self, count: usize) -> NextqResult<()> {
        let rows = self.take_rows(count, usize::from(self.term.size().1));
        self.term.clear_last_lines(rows).map_err(terminal_error)
    }

    fn enter_key_capture(&mut self) -> NextqResult<()> {
        self.term.hide_cursor().map_err(terminal_error)?;
        self.cursor_hidden = true;
        Ok(())
    }

    fn leave_key_capture(&mut self) -> NextqResult<()> {
        if self.cursor_hidden {
            self.cursor_hidden = false;
            self.term.show_cursor().map_err(terminal_error)?;
        }
        Ok(())
    }

    fn release(&mut self) -> NextqResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.stdin = None;
        debug!("Standard input released");
        self.leave_key_capture()
    }
}

/// Terminal rows taken by lines of the given visible widths.
fn physical_rows(widths: &[usize], columns: usize) -> usize {
    let columns = columns.max(1);
    widths.iter().map(|&w| w.div_ceil(columns).max(1)).sum()
}

fn terminal_error(e: io::Error) -> nextq_core::error::NextqError {
    PromptError::Terminal {
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_idempotent() {
        let mut term = ConsoleTerminal::new().without_key_navigation();
        term.release().unwrap();
        term.release().unwrap();
        assert!(!term.is_interactive());
    }

    #[test]
    fn wide_lines_count_every_wrapped_row() {
        assert_eq!(physical_rows(&[10, 0, 80], 80), 3);
        assert_eq!(physical_rows(&[81], 80), 2);
        assert_eq!(physical_rows(&[200, 5], 80), 4);
    }

    #[test]
    fn zero_columns_does_not_divide_by_zero() {
        assert_eq!(physical_rows(&[3, 3], 0), 6);
    }

    #[test]
    fn clearing_a_wrapped_option_list() {
        let mut term = ConsoleTerminal::new();
        term.remember_width("? Choose an authentication solution: ");
        term.remember_width(&format!("> {}", "x".repeat(50)));
        term.remember_width("  clerk");

        // 37 + 52 + 7 columns on a 40-column terminal: 1 + 2 + 1 rows.
        assert_eq!(term.take_rows(3, 40), 4);
        assert!(term.widths.is_empty());
    }

    #[test]
    fn coloured_lines_are_measured_without_escape_codes() {
        let mut term = ConsoleTerminal::new();
        term.remember_width("\u{1b}[36m> npm\u{1b}[0m");
        assert_eq!(term.widths, [5]);
    }

    #[test]
    fn clearing_past_history_counts_one_row_per_line() {
        let mut term = ConsoleTerminal::new();
        term.remember_width("abc");
        assert_eq!(term.take_rows(3, 80), 3);
    }

    #[test]
    fn width_history_is_bounded() {
        let mut term = ConsoleTerminal::new();
        for _ in 0..WIDTH_HISTORY + 10 {
            term.remember_width("x");
        }
        assert_eq!(term.widths.len(), WIDTH_HISTORY);
    }

    #[test]
    fn reading_after_release_fails() {
        let mut term = ConsoleTerminal::new();
        term.release().unwrap();
        assert!(term.read_line().is_err());
    }
}
