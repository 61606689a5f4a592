//! The parser interface.

use miv_core::{DiagramBlock, Language};

use crate::ParseError;

/// Extracts diagram blocks from the full text of one document.
///
/// Implementations are stateless; a single instance can serve any number of
/// concurrent calls.
pub trait CommentParser: Send + Sync {
    /// Language attached to blocks returned by [`parse`](Self::parse).
    fn language(&self) -> Language;

    /// Extract diagram blocks, tagging each with `language`.
    ///
    /// Lets one parser serve several language variants (e.g. TypeScript and
    /// JSX) while reporting the caller's language on the blocks.
    fn parse_as(&self, text: &str, language: Language) -> Result<Vec<DiagramBlock>, ParseError>;

    /// Extract diagram blocks from `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TooLong`] for inputs over
    /// [`MAX_TEXT_CHARS`](crate::MAX_TEXT_CHARS) characters. Comments that do
    /// not yield valid diagram code are skipped, not reported.
    fn parse(&self, text: &str) -> Result<Vec<DiagramBlock>, ParseError> {
        self.parse_as(text, self.language())
    }
}
