//! Inclusive line ranges.

use serde::Serialize;

use crate::LineNumber;

/// Error returned when a range would end before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("range end {end} is before start {start}")]
pub struct RangeError {
    /// Requested start line.
    pub start: LineNumber,
    /// Requested end line.
    pub end: LineNumber,
}

/// Inclusive `[start, end]` interval of source lines.
///
/// Immutable once constructed; `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CodeRange {
    start: LineNumber,
    end: LineNumber,
}

impl CodeRange {
    /// Create a range covering `start..=end`.
    pub fn new(start: LineNumber, end: LineNumber) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// First line of the range.
    #[must_use]
    pub fn start(&self) -> LineNumber {
        self.start
    }

    /// Last line of the range (inclusive).
    #[must_use]
    pub fn end(&self) -> LineNumber {
        self.end
    }

    /// Whether `line` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, line: LineNumber) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered, counting both ends.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.end.get() - self.start.get() + 1
    }
}
