//! Rust sources: `/* ... */` comments and `//!` inner doc comment runs.

use miv_core::{DiagramBlock, Language};

use crate::block::BLOCK_COMMENT;
use crate::engine::{self, Candidate, CommentStyle};
use crate::patterns::Patterns;
use crate::{CommentParser, ParseError};

/// A `//! mermaid` line and the `//!` lines directly below it.
const DOC_COMMENT: CommentStyle = CommentStyle {
    name: "doc",
    discover: discover_doc_runs,
    strip_line: strip_doc_prefix,
};

fn discover_doc_runs<'t>(text: &'t str, patterns: &Patterns) -> Vec<Candidate<'t>> {
    patterns
        .doc_comment
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let run = caps.get(1)?;
            // A closing newline puts the end on the line after the run
            Some(Candidate {
                start: whole.start(),
                end: whole.end(),
                raw: run.as_str(),
            })
        })
        .collect()
}

fn strip_doc_prefix(line: &str) -> &str {
    match line.trim_start().strip_prefix("//!") {
        Some(rest) => rest.strip_prefix(char::is_whitespace).unwrap_or(rest),
        None => line,
    }
}

/// Parser for Rust sources.
///
/// Block comments are reported before doc comment runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustParser;

impl CommentParser for RustParser {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn parse_as(&self, text: &str, language: Language) -> Result<Vec<DiagramBlock>, ParseError> {
        engine::parse(text, &[BLOCK_COMMENT, DOC_COMMENT], language)
    }
}

#[cfg(test)]
mod tests {
    use miv_core::LineNumber;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_doc_comment_run() {
        let text = "//! mermaid\n//! graph TD\n//!     A --> B";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph TD\n    A --> B");
        assert_eq!(blocks[0].language(), Language::Rust);
        assert_eq!(blocks[0].range().start().get(), 0);
        assert_eq!(blocks[0].range().end().get(), 2);
    }

    #[test]
    fn test_doc_comment_annotation() {
        let text = "//! @mermaid\n//! graph TD\n//!     A[Parse Input] --> B{Valid?}\n//!     B -->|Yes| C[Process]\n";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        let code = blocks[0].code().as_str();
        assert!(code.contains("A[Parse Input]"));
        assert!(!code.contains("//!"));
        // The closing newline is part of the match
        assert_eq!(blocks[0].range().end().get(), 4);
    }

    #[test]
    fn test_doc_run_stops_at_code() {
        let text = "//! Crate docs.\n//!\n//! Mermaid:\n//! graph LR\n//!   A --> B\n\nuse std::fmt;\n";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph LR\n  A --> B");
        assert_eq!(blocks[0].range().start().get(), 2);
        assert_eq!(blocks[0].range().end().get(), 5);
    }

    #[test]
    fn test_doc_run_range_ends_after_newline() {
        let text = "//! mermaid\n//! graph TD\n//!   A-->B\n\nfn main(){}\n";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].range().start().get(), 0);
        assert_eq!(blocks[0].range().end().get(), 3);
        assert!(blocks[0].range().contains(LineNumber::from(3)));
        assert!(!blocks[0].range().contains(LineNumber::from(4)));
    }

    #[test]
    fn test_indented_doc_run() {
        let text = "mod inner {\n    //! mermaid\n    //! pie\n    //!     \"a\" : 1\n}\n";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "pie\n    \"a\" : 1");
    }

    #[test]
    fn test_block_comment() {
        let text = "/*\n * @mermaid\n * graph LR\n *     A[Client] --> B[API]\n */\nfn main() {}";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph LR\n    A[Client] --> B[API]");
    }

    #[test]
    fn test_block_comments_before_doc_runs() {
        let text = "//! @mermaid
//! sequenceDiagram
//!     A->>B: Message

/*
mermaid
graph TD
    A --> B
*/
fn func1() {}";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].code().as_str().starts_with("graph TD"));
        assert!(blocks[1].code().as_str().starts_with("sequenceDiagram"));
        assert!(blocks[0].range().start() > blocks[1].range().start());
    }

    #[test]
    fn test_does_not_cross_comment_boundaries() {
        let text = "
/* コメント1: ドキュメント */
struct Config {}

/* コメント2: 設定 */
struct Settings {}

/*
 * @mermaid
 * graph TD
 *   A[Start] --> B[End]
 */
fn main() {}";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph TD\n  A[Start] --> B[End]");
        assert_eq!(blocks[0].range().start().get(), 7);
    }

    #[test]
    fn test_interleaved_regular_comments() {
        let text = "
/* 通常コメント1 */
struct Config {}

/*
 * @mermaid
 * graph TD
 *   A[First] --> B[Diagram]
 */
fn first() {}

/* 通常コメント2 */
let value = 1;

/*
 * @mermaid
 * sequenceDiagram
 *   User->>API: Request
 */
fn second() {}";
        let blocks = RustParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| !b.code().as_str().contains("通常コメント")));
        assert!(blocks[0].range().start() < blocks[1].range().start());
    }

    #[test]
    fn test_no_diagram() {
        assert!(RustParser.parse("").unwrap().is_empty());
        let text = "//! Regular crate docs.\n//! Nothing to draw.\n/* plain */\nfn main() {}";
        assert!(RustParser.parse(text).unwrap().is_empty());
    }
}
