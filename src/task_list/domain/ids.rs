//! Identifier and validated scalar types for the todo domain.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a todo record.
///
/// Identifiers are positive and ordered; a persisted list is sorted by
/// ascending identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a validated todo identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidId`] when the value is zero or
    /// negative.
    pub const fn new(value: i64) -> Result<Self, TodoDomainError> {
        if value <= 0 {
            return Err(TodoDomainError::InvalidId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TodoId {
    type Error = TodoDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for i64 {
    fn from(id: TodoId) -> Self {
        id.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty label shown for a todo.
///
/// The label keeps the text exactly as entered; only the emptiness check
/// trims whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoLabel(String);

impl TodoLabel {
    /// Creates a validated label.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyLabel`] when the value is empty or
    /// whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TodoDomainError::EmptyLabel);
        }
        Ok(Self(raw))
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoLabel {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoLabel> for String {
    fn from(label: TodoLabel) -> Self {
        label.0
    }
}

impl AsRef<str> for TodoLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
