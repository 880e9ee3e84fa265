//! Prompt Engine - resolves questions into an [`AnswerSet`].
//!
//! The engine owns its [`Terminal`] for as long as it lives. The input
//! resource is released by [`PromptEngine::close`], by [`PromptEngine::scoped`]
//! on return, or by `Drop`, whichever comes first.

use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        PromptError,
        ports::{Key, PlainTheme, Terminal, Theme},
    },
    domain::{
        Answer, AnswerSet, Confirm, DomainValidator as validator, FreeText, Question,
        SelectCursor, SingleSelect,
    },
    error::NextqResult,
};

/// Interactive question/answer engine.
pub struct PromptEngine<T: Terminal> {
    terminal: T,
    theme: Box<dyn Theme>,
    closed: bool,
}

impl<T: Terminal> PromptEngine<T> {
    /// Create an engine with the unstyled theme.
    pub fn new(terminal: T) -> Self {
        Self::with_theme(terminal, Box::new(PlainTheme))
    }

    pub fn with_theme(terminal: T, theme: Box<dyn Theme>) -> Self {
        Self {
            terminal,
            theme,
            closed: false,
        }
    }

    /// Run `f` with a fresh engine and release the terminal afterwards.
    ///
    /// The terminal is released whether `f` succeeds or fails. An error from
    /// `f` takes precedence over an error from releasing.
    pub fn scoped<R, F>(terminal: T, theme: Box<dyn Theme>, f: F) -> NextqResult<R>
    where
        F: FnOnce(&mut Self) -> NextqResult<R>,
    {
        let mut engine = Self::with_theme(terminal, theme);
        let result = f(&mut engine);
        let released = engine.close();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Resolve `questions` strictly in order.
    ///
    /// All questions are checked before anything is printed; a malformed
    /// question is a configuration error, not something to re-prompt.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub fn resolve(&mut self, questions: &[Question]) -> NextqResult<AnswerSet> {
        self.ensure_open()?;
        validator::validate_questions(questions)?;

        let mut answers = AnswerSet::new();
        for question in questions {
            let answer = self.ask_validated(question)?;
            answers.insert(question.key(), answer)?;
        }

        debug!(answers = answers.len(), "Questions resolved");
        Ok(answers)
    }

    /// Ask a single question.
    pub fn ask(&mut self, question: &Question) -> NextqResult<Answer> {
        self.ensure_open()?;
        question.validate()?;
        self.ask_validated(question)
    }

    /// Release the input resource. Calling this more than once is harmless.
    pub fn close(&mut self) -> NextqResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("Releasing prompt terminal");
        self.terminal.release()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    // -------------------------------------------------------------------------
    // Per-kind resolution
    // -------------------------------------------------------------------------

    fn ensure_open(&self) -> NextqResult<()> {
        if self.closed {
            return Err(PromptError::Closed.into());
        }
        Ok(())
    }

    fn ask_validated(&mut self, question: &Question) -> NextqResult<Answer> {
        debug!(key = question.key(), kind = %question.kind(), "Asking question");
        match question {
            Question::FreeText(q) => self.ask_free_text(q),
            Question::Confirm(q) => self.ask_confirm(q),
            Question::SingleSelect(q) => self.ask_select(q),
        }
    }

    fn ask_free_text(&mut self, q: &FreeText) -> NextqResult<Answer> {
        let hint = q
            .default
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!("(default: {d})"));
        let prompt = self.theme.question(&q.message, hint.as_deref());

        loop {
            self.terminal.write_prompt(&prompt)?;
            let line = self.next_line()?;
            let candidate = q.candidate(&line);

            match q.check(&candidate) {
                Ok(()) => return Ok(Answer::Text(candidate)),
                Err(message) => {
                    debug!(key = %q.key, "Input rejected by validator");
                    let line = self.theme.error(&message);
                    self.terminal.write_line(&line)?;
                }
            }
        }
    }

    fn ask_confirm(&mut self, q: &Confirm) -> NextqResult<Answer> {
        let prompt = self.theme.question(&q.message, Some(q.hint()));

        loop {
            self.terminal.write_prompt(&prompt)?;
            let line = self.next_line()?;
            if let Some(value) = q.interpret(&line) {
                return Ok(Answer::Bool(value));
            }
        }
    }

    fn ask_select(&mut self, q: &SingleSelect) -> NextqResult<Answer> {
        if self.terminal.is_interactive() {
            self.select_with_keys(q)
        } else {
            self.select_numbered(q)
        }
    }

    fn select_with_keys(&mut self, q: &SingleSelect) -> NextqResult<Answer> {
        let mut cursor = SelectCursor::new(q.default_index().unwrap_or(0), q.options.len());
        let theme = self.theme.as_ref();

        self.terminal.write_line(&theme.question(&q.message, None))?;
        draw_options(&mut self.terminal, theme, q, &cursor)?;

        let mut capture = KeyCapture::enter(&mut self.terminal)?;
        loop {
            match capture.read_key()? {
                Key::Up => {
                    cursor.up();
                    redraw_options(&mut *capture, theme, q, &cursor)?;
                }
                Key::Down => {
                    cursor.down();
                    redraw_options(&mut *capture, theme, q, &cursor)?;
                }
                Key::Enter => {
                    let choice = q.options[cursor.selected()].clone();
                    capture.clear_lines(q.options.len() + 1)?;
                    capture.write_line(&theme.answered(&q.message, &choice))?;
                    return Ok(Answer::Choice(choice));
                }
                Key::Interrupt => {
                    warn!(key = %q.key, "Selection interrupted");
                    return Err(PromptError::Interrupted.into());
                }
                Key::Other => {}
            }
        }
    }

    fn select_numbered(&mut self, q: &SingleSelect) -> NextqResult<Answer> {
        let default_index = q.default_index();

        self.terminal
            .write_line(&self.theme.question(&q.message, None))?;
        for (i, option) in q.options.iter().enumerate() {
            let line = self
                .theme
                .numbered_option(i + 1, option, Some(i) == default_index);
            self.terminal.write_line(&line)?;
        }

        let prompt = self.theme.answer_prompt();
        loop {
            self.terminal.write_prompt(&prompt)?;
            let line = self.next_line()?;
            if let Some(choice) = q.match_input(&line) {
                return Ok(Answer::Choice(choice.to_string()));
            }

            debug!(key = %q.key, input = %line.trim(), "No option matched");
            let message = format!(
                "Please enter a number between 1 and {} or the option name",
                q.options.len()
            );
            let line = self.theme.error(&message);
            self.terminal.write_line(&line)?;
        }
    }

    fn next_line(&mut self) -> NextqResult<String> {
        self.terminal
            .read_line()?
            .ok_or_else(|| PromptError::InputClosed.into())
    }
}

impl<T: Terminal> Drop for PromptEngine<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "Failed to release prompt terminal");
        }
    }
}

// ── Key capture guard ─────────────────────────────────────────────────────────

/// Key-capture mode for the lifetime of the guard.
///
/// Leaving the mode happens in `Drop`, so it also runs when a prompt returns
/// early with an error (including an interrupt).
struct KeyCapture<'a, T: Terminal> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal> KeyCapture<'a, T> {
    fn enter(terminal: &'a mut T) -> NextqResult<Self> {
        terminal.enter_key_capture()?;
        Ok(Self { terminal })
    }
}

impl<T: Terminal> Deref for KeyCapture<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal> DerefMut for KeyCapture<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal> Drop for KeyCapture<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.leave_key_capture() {
            warn!(error = %e, "Failed to leave key-capture mode");
        }
    }
}

// ── Option list rendering ─────────────────────────────────────────────────────

fn draw_options<T: Terminal>(
    terminal: &mut T,
    theme: &dyn Theme,
    q: &SingleSelect,
    cursor: &SelectCursor,
) -> NextqResult<()> {
    for (i, option) in q.options.iter().enumerate() {
        terminal.write_line(&theme.option(option, i == cursor.selected()))?;
    }
    Ok(())
}

fn redraw_options<T: Terminal>(
    terminal: &mut T,
    theme: &dyn Theme,
    q: &SingleSelect,
    cursor: &SelectCursor,
) -> NextqResult<()> {
    terminal.clear_lines(q.options.len())?;
    draw_options(terminal, theme, q, cursor)
}

// ── tests ─────────────────────────────────────────────────────────────────────
