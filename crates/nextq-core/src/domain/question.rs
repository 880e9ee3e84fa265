//! Question specifications consumed by the prompt engine.
//!
//! Each kind is its own struct carrying only the fields it uses; [`Question`]
//! is the tagged union the engine matches on.

use std::fmt;
use std::sync::Arc;

use crate::domain::answer::Answer;
use crate::domain::error::DomainError;

/// Accepts (`Ok`) or rejects (`Err(message)`) a filtered free-text value.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Transforms raw free-text input before validation.
pub type Filter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The kind of a question, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    FreeText,
    Confirm,
    SingleSelect,
}

impl QuestionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FreeText => "free-text",
            Self::Confirm => "confirm",
            Self::SingleSelect => "single-select",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Question ──────────────────────────────────────────────────────────────────

/// A single prompt specification.
#[derive(Clone, Debug)]
pub enum Question {
    FreeText(FreeText),
    Confirm(Confirm),
    SingleSelect(SingleSelect),
}

impl Question {
    /// Start building a free-text question.
    pub fn text(key: impl Into<String>, message: impl Into<String>) -> FreeText {
        FreeText {
            key: key.into(),
            message: message.into(),
            default: None,
            validator: None,
            filter: None,
        }
    }

    /// Start building a yes/no question.
    pub fn confirm(key: impl Into<String>, message: impl Into<String>) -> Confirm {
        Confirm {
            key: key.into(),
            message: message.into(),
            default: None,
        }
    }

    /// Start building a single-select question over `options`.
    pub fn select<I, S>(key: impl Into<String>, message: impl Into<String>, options: I) -> SingleSelect
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SingleSelect {
            key: key.into(),
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            default: None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::FreeText(q) => &q.key,
            Self::Confirm(q) => &q.key,
            Self::SingleSelect(q) => &q.key,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::FreeText(q) => &q.message,
            Self::Confirm(q) => &q.message,
            Self::SingleSelect(q) => &q.message,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::FreeText(_) => QuestionKind::FreeText,
            Self::Confirm(_) => QuestionKind::Confirm,
            Self::SingleSelect(_) => QuestionKind::SingleSelect,
        }
    }

    /// Check the invariants of this question in isolation.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.key().trim().is_empty() {
            return Err(DomainError::EmptyKey);
        }
        match self {
            Self::SingleSelect(q) => q.validate(),
            Self::FreeText(_) | Self::Confirm(_) => Ok(()),
        }
    }

    /// The answer an empty line would produce, if it would be accepted.
    ///
    /// Used to answer a question list without prompting.
    pub fn default_answer(&self) -> Option<Answer> {
        match self {
            Self::FreeText(q) => {
                let candidate = q.candidate("");
                if candidate.is_empty() || q.check(&candidate).is_err() {
                    None
                } else {
                    Some(Answer::Text(candidate))
                }
            }
            Self::Confirm(q) => q.interpret("").map(Answer::Bool),
            Self::SingleSelect(q) => q.match_input("").map(|c| Answer::Choice(c.to_string())),
        }
    }
}

// ── FreeText ──────────────────────────────────────────────────────────────────

/// Free-text input with optional default, filter, and validator.
#[derive(Clone)]
pub struct FreeText {
    pub key: String,
    pub message: String,
    pub default: Option<String>,
    validator: Option<Validator>,
    filter: Option<Filter>,
}

impl FreeText {
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validate_with<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn filter_with<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Turn one line of raw input into a candidate answer.
    ///
    /// Trims, substitutes the default for empty input, then filters.
    pub fn candidate(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let value = match (&self.default, trimmed.is_empty()) {
            (Some(default), true) => default.as_str(),
            _ => trimmed,
        };
        match &self.filter {
            Some(filter) => filter(value),
            None => value.to_string(),
        }
    }

    /// Run the validator, if any, on a filtered candidate.
    pub fn check(&self, candidate: &str) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator(candidate),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FreeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeText")
            .field("key", &self.key)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl From<FreeText> for Question {
    fn from(q: FreeText) -> Self {
        Self::FreeText(q)
    }
}

// ── Confirm ───────────────────────────────────────────────────────────────────

/// Yes/no question. Empty input yields the default, or `false` without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub key: String,
    pub message: String,
    pub default: Option<bool>,
}

impl Confirm {
    pub fn default(mut self, value: bool) -> Self {
        self.default = Some(value);
        self
    }

    /// `(Y/n)` when the default is yes, `(y/N)` otherwise.
    pub fn hint(&self) -> &'static str {
        if self.default.unwrap_or(false) {
            "(Y/n)"
        } else {
            "(y/N)"
        }
    }

    /// Interpret one line of input. `None` means "ask again".
    pub fn interpret(&self, raw: &str) -> Option<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Some(self.default.unwrap_or(false)),
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        }
    }
}

impl From<Confirm> for Question {
    fn from(q: Confirm) -> Self {
        Self::Confirm(q)
    }
}

// ── SingleSelect ──────────────────────────────────────────────────────────────

/// Pick exactly one of a fixed, ordered list of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSelect {
    pub key: String,
    pub message: String,
    pub options: Vec<String>,
    pub default: Option<String>,
}

impl SingleSelect {
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Index of the default option, if one is set and present.
    pub fn default_index(&self) -> Option<usize> {
        let default = self.default.as_ref()?;
        self.options.iter().position(|o| o == default)
    }

    /// Match one line of piped input against the options.
    ///
    /// Accepts a 1-based index, a case-insensitive option name, or empty
    /// input when a default exists.
    pub fn match_input(&self, raw: &str) -> Option<&str> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return self.default_index().map(|i| self.options[i].as_str());
        }

        if let Ok(n) = trimmed.parse::<usize>() {
            if (1..=self.options.len()).contains(&n) {
                return Some(self.options[n - 1].as_str());
            }
        }

        self.options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(trimmed))
            .map(String::as_str)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.options.is_empty() {
            return Err(DomainError::EmptyOptions {
                key: self.key.clone(),
            });
        }
        if let Some(default) = &self.default {
            if !self.options.contains(default) {
                return Err(DomainError::DefaultNotAnOption {
                    key: self.key.clone(),
                    default: default.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<SingleSelect> for Question {
    fn from(q: SingleSelect) -> Self {
        Self::SingleSelect(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linters() -> SingleSelect {
        Question::select("linter", "Choose a linter", ["none", "eslint", "biome"]).default("none")
    }

    #[test]
    fn free_text_substitutes_default_for_blank_input() {
        let q = Question::text("name", "Name").default("foo");
        assert_eq!(q.candidate(""), "foo");
        assert_eq!(q.candidate("   "), "foo");
        assert_eq!(q.candidate(" bar "), "bar");
    }

    #[test]
    fn free_text_filter_runs_after_default() {
        let q = Question::text("name", "Name")
            .default("")
            .filter_with(|s| if s.is_empty() { ".".into() } else { s.into() });
        assert_eq!(q.candidate(""), ".");
    }

    #[test]
    fn free_text_without_validator_accepts_anything() {
        let q = Question::text("name", "Name");
        assert!(q.check("Anything At All").is_ok());
    }

    #[test]
    fn confirm_hint_reflects_default() {
        assert_eq!(Question::confirm("a", "A").default(true).hint(), "(Y/n)");
        assert_eq!(Question::confirm("a", "A").default(false).hint(), "(y/N)");
        assert_eq!(Question::confirm("a", "A").hint(), "(y/N)");
    }

    #[test]
    fn confirm_interprets_input() {
        let q = Question::confirm("ts", "TypeScript?").default(true);
        assert_eq!(q.interpret(""), Some(true));
        assert_eq!(q.interpret("n"), Some(false));
        assert_eq!(q.interpret("Y"), Some(true));
        assert_eq!(q.interpret("NO"), Some(false));
        assert_eq!(q.interpret("maybe"), None);
    }

    #[test]
    fn confirm_without_default_is_false_on_empty() {
        assert_eq!(Question::confirm("a", "A").interpret(""), Some(false));
    }

    #[test]
    fn select_matches_index_name_and_default() {
        let q = linters();
        assert_eq!(q.match_input("2"), Some("eslint"));
        assert_eq!(q.match_input("BIOME"), Some("biome"));
        assert_eq!(q.match_input(""), Some("none"));
        assert_eq!(q.match_input("7"), None);
        assert_eq!(q.match_input("0"), None);
        assert_eq!(q.match_input("prettier"), None);
    }

    #[test]
    fn select_without_default_rejects_empty() {
        let q = Question::select("pm", "Package manager", ["npm", "pnpm"]);
        assert_eq!(q.match_input(""), None);
    }

    #[test]
    fn select_with_no_options_is_invalid() {
        let q: Question = Question::select("pm", "Package manager", Vec::<String>::new()).into();
        assert!(matches!(q.validate(), Err(DomainError::EmptyOptions { .. })));
    }

    #[test]
    fn select_default_must_be_an_option() {
        let q: Question = Question::select("pm", "PM", ["npm"]).default("bun").into();
        assert!(matches!(
            q.validate(),
            Err(DomainError::DefaultNotAnOption { .. })
        ));
    }

    #[test]
    fn blank_key_is_invalid() {
        let q: Question = Question::confirm("  ", "A").into();
        assert_eq!(q.validate(), Err(DomainError::EmptyKey));
    }

    #[test]
    fn default_answer_per_kind() {
        let text: Question = Question::text("name", "Name").default("app").into();
        let bare: Question = Question::text("name", "Name").into();
        let confirm: Question = Question::confirm("ts", "TS?").into();
        let select: Question = linters().into();
        let no_default: Question = Question::select("pm", "PM", ["npm"]).into();

        assert_eq!(text.default_answer(), Some(Answer::Text("app".into())));
        assert_eq!(bare.default_answer(), None);
        assert_eq!(confirm.default_answer(), Some(Answer::Bool(false)));
        assert_eq!(select.default_answer(), Some(Answer::Choice("none".into())));
        assert_eq!(no_default.default_answer(), None);
    }

    #[test]
    fn default_answer_respects_validator() {
        let q: Question = Question::text("name", "Name")
            .default("App")
            .validate_with(|s| if s == "App" { Err("no".into()) } else { Ok(()) })
            .into();
        assert_eq!(q.default_answer(), None);
    }
}
