//! Parse error type.

/// Call-level parse failure.
///
/// A failing call yields no blocks at all. Rejected candidates never produce
/// an error; they are dropped from the result instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input exceeds the character limit checked before any scanning.
    #[error("text too long to parse safely ({len} characters, limit {max})")]
    TooLong {
        /// Input length in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// A discovery pattern could not be compiled.
    #[error("pattern error: {0}")]
    Pattern(String),
}
