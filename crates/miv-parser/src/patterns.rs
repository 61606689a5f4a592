//! Compiled regular expressions shared by every parser.
//!
//! Patterns are compiled once per process. A compilation failure is kept and
//! reported from every `parse` call instead of panicking.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::ParseError;
use crate::engine::Head;

/// Block comment body (text after `/*`) that opens with the marker,
/// optionally behind stars.
///
/// Trailing whitespace is consumed so the capture starts at the next content.
const BLOCK_LEADING: &str = r"\A[\s*]*@?mermaid:?\s*";

/// Marker anywhere in a block comment body: `@mermaid`, or a line starting
/// with `mermaid` / `Mermaid:` after an optional `*`.
const BLOCK_MARKER: &str = r"(?:@mermaid:?|\n\s*\*?\s*mermaid:?)\s*";

/// Marker ending its line anywhere in a docstring body.
const DOCSTRING_MARKER: &str = r"@?mermaid:?\s*\n";

/// A `//!` marker line followed by a run of `//!` lines, which may be indented.
const DOC_COMMENT: &str = r"//![ \t]*@?mermaid:?[ \t\r]*\n((?:[ \t]*//![^\n]*(?:\n|\z))+)";

/// Keywords that open diagram markup, plus `%%` directives and comments.
const DIAGRAM_START: &str = concat!(
    r"\A(?:graph|flowchart|sequenceDiagram|stateDiagram|classDiagram|erDiagram",
    r"|gantt|pie|gitgraph|journey|requirement",
    r"|C4Context|C4Container|C4Component|C4Dynamic|C4Deployment",
    r"|mindmap|timeline|sankey-beta|quadrantChart",
    r"|xychart-beta|block-beta|packet-beta|architecture-beta|%%)",
);

/// Section headers that end diagram markup inside a comment.
const DOC_HEADER: &str = concat!(
    r"\A(?:",
    r"(?i:セキュリティ考慮事項|Security(?:\s+Considerations)?|環境変数|Environment(?:\s+Variables)?",
    r"|使用方法|Usage|CSVフォーマット|CSV\s+Format|注意事項|Notes?|参考|References?):",
    r"|##?\s",
    r"|[A-Z][a-z]+:",
    r")",
);

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(Patterns::compile);

/// Process-wide pattern table.
#[derive(Debug)]
pub(crate) struct Patterns {
    block_leading: Regex,
    block_marker: Regex,
    docstring_marker: Regex,
    pub(crate) doc_comment: Regex,
    pub(crate) diagram_start: Regex,
    pub(crate) doc_header: Regex,
}

impl Patterns {
    /// Shared pattern table, compiled on first use.
    pub(crate) fn get() -> Result<&'static Self, ParseError> {
        PATTERNS
            .as_ref()
            .map_err(|e| ParseError::Pattern(e.to_string()))
    }

    fn compile() -> Result<Self, regex::Error> {
        let insensitive = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
        Ok(Self {
            block_leading: insensitive(BLOCK_LEADING)?,
            block_marker: insensitive(BLOCK_MARKER)?,
            docstring_marker: insensitive(DOCSTRING_MARKER)?,
            doc_comment: insensitive(DOC_COMMENT)?,
            diagram_start: insensitive(DIAGRAM_START)?,
            doc_header: Regex::new(DOC_HEADER)?,
        })
    }

    /// Head of a `/* ... */` body that announces a diagram.
    pub(crate) fn block_head(&self) -> Head<'_> {
        Head {
            leading: Some(&self.block_leading),
            marker: &self.block_marker,
        }
    }

    /// Head of a docstring body: any prose, then a marker ending its line.
    pub(crate) fn docstring_head(&self) -> Head<'_> {
        Head {
            leading: None,
            marker: &self.docstring_marker,
        }
    }

    /// Whether a trimmed line opens diagram markup.
    pub(crate) fn is_diagram_start(&self, line: &str) -> bool {
        self.diagram_start.is_match(line)
    }

    /// Whether a trimmed line is a documentation section header.
    pub(crate) fn is_doc_header(&self, line: &str) -> bool {
        self.doc_header.is_match(line)
    }
}
