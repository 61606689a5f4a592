//! `/* ... */` comments, as written in TypeScript, JavaScript and Go.

use miv_core::{DiagramBlock, Language};

use crate::engine::{self, Candidate, CommentStyle};
use crate::patterns::Patterns;
use crate::{CommentParser, ParseError};

/// Block comments opened by a `mermaid`, `@mermaid` or `Mermaid:` marker.
pub(crate) const BLOCK_COMMENT: CommentStyle = CommentStyle {
    name: "block",
    discover: discover_block,
    strip_line: strip_leading_star,
};

fn discover_block<'t>(text: &'t str, patterns: &Patterns) -> Vec<Candidate<'t>> {
    engine::scan_delimited(text, "/*", "*/", patterns.block_head())
}

/// Drop a leading `*` and the single space after it.
///
/// Lines without a star are kept as written.
fn strip_leading_star(line: &str) -> &str {
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.strip_prefix(char::is_whitespace).unwrap_or(rest),
        None => line,
    }
}

/// Parser for the JavaScript family: `.ts`, `.tsx`, `.js` and `.jsx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptParser;

impl CommentParser for TypeScriptParser {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn parse_as(&self, text: &str, language: Language) -> Result<Vec<DiagramBlock>, ParseError> {
        engine::parse(text, &[BLOCK_COMMENT], language)
    }
}

/// Parser for Go sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParser;

impl CommentParser for GoParser {
    fn language(&self) -> Language {
        Language::Go
    }

    fn parse_as(&self, text: &str, language: Language) -> Result<Vec<DiagramBlock>, ParseError> {
        engine::parse(text, &[BLOCK_COMMENT], language)
    }
}
