//! Validated primitive wrappers.

use std::fmt;

use serde::Serialize;

/// Error returned when a value fails its construction invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Line numbers are zero-based and cannot be negative.
    #[error("line number must be non-negative, got {0}")]
    NegativeLineNumber(i64),
    /// Line number does not fit the supported range.
    #[error("line number {0} is out of range")]
    LineNumberOutOfRange(i64),
    /// Diagram code was empty after trimming.
    #[error("diagram code is empty")]
    EmptyDiagramCode,
}

/// Zero-based source line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineNumber(u32);

impl LineNumber {
    /// First line of a document.
    pub const ZERO: Self = Self(0);

    /// Create a line number, rejecting negative values.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::NegativeLineNumber(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::LineNumberOutOfRange(value))
    }

    /// Raw zero-based value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<usize> for LineNumber {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self).map_err(|_| {
            ValidationError::LineNumberOutOfRange(i64::try_from(value).unwrap_or(i64::MAX))
        })
    }
}

impl From<u32> for LineNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed, non-empty diagram markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DiagramCode(String);

impl DiagramCode {
    /// Trim `value` and wrap it, failing if nothing remains.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDiagramCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Diagram markup as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the markup.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for DiagramCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
