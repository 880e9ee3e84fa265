//! Resolved answers.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::DomainError;

/// A resolved answer value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Free-text answer, after filtering and validation.
    Text(String),
    /// Confirm answer.
    Bool(bool),
    /// Single-select answer; always one of the question's options.
    Choice(String),
}

impl Answer {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Choice(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("Yes"),
            Self::Bool(false) => f.write_str("No"),
        }
    }
}

/// Ordered mapping from question key to answer.
///
/// Iteration order is insertion order, which the engine keeps equal to
/// question order. A key can be set only once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(String, Answer)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Fails if `key` already has one.
    pub fn insert(&mut self, key: impl Into<String>, answer: Answer) -> Result<(), DomainError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(DomainError::AnswerAlreadySet { key });
        }
        self.entries.push((key, answer));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, answer)| answer)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Free-text answer for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Confirm answer for `key`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Single-select answer for `key`.
    pub fn choice(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Answer::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move every answer of `other` into `self`, keeping order.
    pub fn extend(&mut self, other: AnswerSet) -> Result<(), DomainError> {
        for (key, answer) in other.entries {
            self.insert(key, answer)?;
        }
        Ok(())
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, answer) in &self.entries {
            map.serialize_entry(key, answer)?;
        }
        map.end()
    }
}
