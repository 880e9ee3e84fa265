//! Scripted terminal adapter for testing.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use nextq_core::{
    application::{
        PromptError,
        ports::{Key, Terminal},
    },
    error::{NextqError, NextqResult},
};

/// Terminal that replays queued input and records everything written.
///
/// Clones share state, so a test can hand one clone to the engine and keep
/// another to inspect the transcript afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    inner: Arc<Mutex<ScriptedTerminalInner>>,
}

#[derive(Debug, Default)]
struct ScriptedTerminalInner {
    interactive: bool,
    lines: VecDeque<String>,
    keys: VecDeque<Key>,
    output: Vec<String>,
    capturing: bool,
    capture_sessions: usize,
    releases: usize,
}

impl ScriptedTerminal {
    /// Non-interactive terminal fed with `lines`, as if stdin were piped.
    pub fn piped<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let term = Self::default();
        term.lock().lines = lines.into_iter().map(Into::into).collect();
        term
    }

    /// Interactive terminal fed with `keys`.
    pub fn interactive(keys: impl IntoIterator<Item = Key>) -> Self {
        let term = Self::default();
        {
            let mut inner = term.lock();
            inner.interactive = true;
            inner.keys = keys.into_iter().collect();
        }
        term
    }

    pub fn push_line(&self, line: impl Into<String>) {
        self.lock().lines.push_back(line.into());
    }

    pub fn push_key(&self, key: Key) {
        self.lock().keys.push_back(key);
    }

    /// Lines currently on screen, oldest first.
    pub fn output(&self) -> Vec<String> {
        self.lock().output.clone()
    }

    pub fn transcript(&self) -> String {
        self.lock().output.join("\n")
    }

    /// Queued lines not yet read.
    pub fn pending_lines(&self) -> usize {
        self.lock().lines.len()
    }

    pub fn is_capturing(&self) -> bool {
        self.lock().capturing
    }

    /// How many times key-capture mode was entered.
    pub fn capture_sessions(&self) -> usize {
        self.lock().capture_sessions
    }

    pub fn release_count(&self) -> usize {
        self.lock().releases
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedTerminalInner> {
        // A panicking test thread must not hide the transcript from others.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Terminal for ScriptedTerminal {
    fn is_interactive(&self) -> bool {
        self.lock().interactive
    }

    fn write_line(&mut self, line: &str) -> NextqResult<()> {
        self.lock().output.push(line.to_string());
        Ok(())
    }

    fn write_prompt(&mut self, prompt: &str) -> NextqResult<()> {
        self.lock().output.push(prompt.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> NextqResult<Option<String>> {
        Ok(self.lock().lines.pop_front())
    }

    fn read_key(&mut self) -> NextqResult<Key> {
        let mut inner = self.lock();
        if !inner.capturing {
            return Err(NextqError::Internal {
                message: "key read outside key-capture mode".into(),
            });
        }
        inner
            .keys
            .pop_front()
            .ok_or_else(|| PromptError::InputClosed.into())
    }

    fn clear_lines(&mut self, count: usize) -> NextqResult<()> {
        let mut inner = self.lock();
        let keep = inner.output.len().saturating_sub(count);
        inner.output.truncate(keep);
        Ok(())
    }

    fn enter_key_capture(&mut self) -> NextqResult<()> {
        let mut inner = self.lock();
        inner.capturing = true;
        inner.capture_sessions += 1;
        Ok(())
    }

    fn leave_key_capture(&mut self) -> NextqResult<()> {
        self.lock().capturing = false;
        Ok(())
    }

    fn release(&mut self) -> NextqResult<()> {
        let mut inner = self.lock();
        inner.releases += 1;
        inner.capturing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_transcript() {
        let term = ScriptedTerminal::piped(["a"]);
        let mut writer = term.clone();
        writer.write_line("hello").unwrap();
        assert_eq!(term.output(), ["hello"]);
        assert_eq!(writer.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(term.pending_lines(), 0);
    }

    #[test]
    fn clear_lines_never_underflows() {
        let mut term = ScriptedTerminal::default();
        term.write_line("one").unwrap();
        term.clear_lines(5).unwrap();
        assert!(term.output().is_empty());
    }

    #[test]
    fn keys_require_capture_mode() {
        let mut term = ScriptedTerminal::interactive([Key::Enter]);
        assert!(term.read_key().is_err());
        term.enter_key_capture().unwrap();
        assert_eq!(term.read_key().unwrap(), Key::Enter);
    }
}
