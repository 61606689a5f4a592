//! Python sources: triple-quoted docstrings.

use miv_core::{DiagramBlock, Language};

use crate::engine::{self, Candidate, CommentStyle};
use crate::patterns::Patterns;
use crate::{CommentParser, ParseError};

const DOUBLE_QUOTED: CommentStyle = CommentStyle {
    name: "double-quoted",
    discover: discover_double_quoted,
    strip_line: undecorated,
};

const SINGLE_QUOTED: CommentStyle = CommentStyle {
    name: "single-quoted",
    discover: discover_single_quoted,
    strip_line: undecorated,
};

fn discover_double_quoted<'t>(text: &'t str, patterns: &Patterns) -> Vec<Candidate<'t>> {
    engine::scan_delimited(text, "\"\"\"", "\"\"\"", patterns.docstring_head())
}

fn discover_single_quoted<'t>(text: &'t str, patterns: &Patterns) -> Vec<Candidate<'t>> {
    engine::scan_delimited(text, "'''", "'''", patterns.docstring_head())
}

fn undecorated(line: &str) -> &str {
    line
}

/// Parser for Python sources.
///
/// All `"""` docstrings are reported before any `'''` docstring, each group
/// in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonParser;

impl CommentParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn parse_as(&self, text: &str, language: Language) -> Result<Vec<DiagramBlock>, ParseError> {
        engine::parse(text, &[DOUBLE_QUOTED, SINGLE_QUOTED], language)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_double_quoted_docstring() {
        let text = "\"\"\"\nmermaid\ngraph TD\n    A[Start] --> B[End]\n\"\"\"";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph TD\n    A[Start] --> B[End]");
        assert_eq!(blocks[0].language(), Language::Python);
    }

    #[test]
    fn test_annotation_in_single_quotes() {
        let text = "'''\n@mermaid\nsequenceDiagram\n    Alice->>Bob: Hello\n'''";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].code().as_str(),
            "sequenceDiagram\n    Alice->>Bob: Hello"
        );
    }

    #[test]
    fn test_indented_docstring_with_prose() {
        let text = "def pay():
    \"\"\"
    決済処理のメインフローを実行する。

    Mermaid:
    graph TD
    Start[開始] --> Validate{有効性確認}
    Validate -- OK --> Charge[課金実行]
    \"\"\"
    pass";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].code().as_str(),
            "graph TD\nStart[開始] --> Validate{有効性確認}\nValidate -- OK --> Charge[課金実行]"
        );
        assert_eq!(blocks[0].range().start().get(), 1);
        assert_eq!(blocks[0].range().end().get(), 8);
    }

    #[test]
    fn test_skips_ordinary_docstrings() {
        let text = "
\"\"\"ドキュメント1\"\"\"
config = {}

\"\"\"設定用ドキュメント\"\"\"
settings = {}

\"\"\"
処理の説明

@mermaid
graph TD
A-->B
\"\"\"
def main():
    pass";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_str(), "graph TD\nA-->B");
        assert_eq!(blocks[0].range().start().get(), 7);
        assert_eq!(blocks[0].range().end().get(), 13);
    }

    #[test]
    fn test_double_quotes_reported_first() {
        let text = "'''
@mermaid
sequenceDiagram
    A->>B: Message
'''
def func1():
    pass

\"\"\"
mermaid
graph TD
    A --> B
\"\"\"
def func2():
    pass";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].code().as_str().starts_with("graph TD"));
        assert!(blocks[1].code().as_str().starts_with("sequenceDiagram"));
        assert_eq!(blocks[0].range().start().get(), 8);
        assert_eq!(blocks[1].range().start().get(), 0);
    }

    #[test]
    fn test_marker_must_end_its_line() {
        let text = "\"\"\"\nThis is a regular docstring\nwithout mermaid code\n\"\"\"";
        assert!(PythonParser.parse(text).unwrap().is_empty());
        assert!(PythonParser.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_star_lines_kept() {
        let text = "\"\"\"\n@mermaid\nclassDiagram\n  * note\n\"\"\"";
        let blocks = PythonParser.parse(text).unwrap();
        assert_eq!(blocks[0].code().as_str(), "classDiagram\n  * note");
    }
}
