//! Extraction pipeline shared by every comment grammar.
//!
//! A language contributes [`CommentStyle`]s: a discovery function that finds
//! candidate comment bodies and a per-line decoration stripper. Everything
//! else happens here:
//!
//! 1. Reject oversized input before any pattern runs
//! 2. Discover candidates, style by style
//! 3. Strip decoration and remove common indentation
//! 4. Skip prose up to the first diagram keyword, stop at a documentation
//!    header or at two consecutive blank lines
//! 5. Reject short or settings-like code
//! 6. Compute the line range of the whole comment and build the block

use miv_core::{CodeRange, DiagramBlock, DiagramCode, Language, LineNumber};
use regex::Regex;

use crate::ParseError;
use crate::patterns::Patterns;

/// Longest input, in characters, that is scanned at all.
pub const MAX_TEXT_CHARS: usize = 1_000_000;

/// Shortest accepted diagram code, in characters.
const MIN_CODE_CHARS: usize = 3;

/// Fragments of the extension's own JSON settings.
const SETTINGS_MARKERS: [&str; 2] = ["\"mermaidInlineViewer", "\": {"];

/// A discovered comment that may contain a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate<'t> {
    /// Byte offset where the whole comment starts.
    pub(crate) start: usize,
    /// Byte offset just past the whole comment.
    pub(crate) end: usize,
    /// Comment body after the diagram marker, still decorated.
    pub(crate) raw: &'t str,
}

/// Finds candidates in a full document.
pub(crate) type Discover = for<'t> fn(&'t str, &Patterns) -> Vec<Candidate<'t>>;

/// One comment grammar.
pub(crate) struct CommentStyle {
    /// Name used in logs.
    pub(crate) name: &'static str,
    pub(crate) discover: Discover,
    /// Removes comment decoration from a single line.
    pub(crate) strip_line: fn(&str) -> &str,
}

/// Run the pipeline over `text` for each style in order.
///
/// Blocks are grouped by style, then ordered by position within a style.
pub(crate) fn parse(
    text: &str,
    styles: &[CommentStyle],
    language: Language,
) -> Result<Vec<DiagramBlock>, ParseError> {
    check_length(text)?;
    let patterns = Patterns::get()?;
    let lines = LineIndex::new(text);

    let mut blocks = Vec::new();
    for style in styles {
        for candidate in (style.discover)(text, patterns) {
            if candidate.raw.is_empty() {
                continue;
            }
            match build_block(&candidate, style, patterns, &lines, language) {
                Some(block) => blocks.push(block),
                None => tracing::debug!(
                    style = style.name,
                    offset = candidate.start,
                    "Skipped diagram candidate"
                ),
            }
        }
    }

    tracing::debug!(%language, blocks = blocks.len(), "Parsed document");
    Ok(blocks)
}

/// Fail if `text` has more than [`MAX_TEXT_CHARS`] characters.
fn check_length(text: &str) -> Result<(), ParseError> {
    // Byte length bounds the character count from above
    if text.len() <= MAX_TEXT_CHARS {
        return Ok(());
    }
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ParseError::TooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

fn build_block(
    candidate: &Candidate<'_>,
    style: &CommentStyle,
    patterns: &Patterns,
    lines: &LineIndex,
    language: Language,
) -> Option<DiagramBlock> {
    let cleaned = clean_code(candidate.raw, style.strip_line, patterns);
    if is_invalid_code(&cleaned) {
        return None;
    }
    let code = DiagramCode::new(&cleaned).ok()?;
    let range = lines.range(candidate.start, candidate.end)?;
    Some(DiagramBlock::new(code, range, language))
}

/// How a comment body announces a diagram.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Head<'p> {
    /// Anchored at the body start. Tried first, at every opener.
    pub(crate) leading: Option<&'p Regex>,
    /// Unanchored marker that may appear anywhere in the body.
    pub(crate) marker: &'p Regex,
}

/// Scan for `open ... close` comments whose body is announced by `head`.
///
/// The body never extends past the first `close` after `open`, so a match
/// cannot cross into a later comment. When the head does not match, the scan
/// resumes one byte after the opener, so an opener nested inside a rejected
/// body still gets its own attempt.
///
/// Openers that share a closer share one closer search and one marker
/// search: a body that lacks the marker has no suffix containing it. Only the
/// anchored head runs at the nested openers, which keeps the scan linear.
pub(crate) fn scan_delimited<'t>(
    text: &'t str,
    open: &str,
    close: &str,
    head: Head<'_>,
) -> Vec<Candidate<'t>> {
    let mut candidates = Vec::new();
    let mut pos = 0;
    // First closer at or after the previous body start
    let mut closer: Option<usize> = None;
    // Closer whose body is known to lack the marker
    let mut unmarked: Option<usize> = None;

    while let Some(found) = text[pos..].find(open) {
        let start = pos + found;
        let body_start = start + open.len();
        let body_end = match closer {
            Some(at) if at >= body_start => at,
            _ => {
                // No closer after this opener means none after any later opener either
                let Some(body_len) = text[body_start..].find(close) else {
                    break;
                };
                closer = Some(body_start + body_len);
                body_start + body_len
            }
        };
        let body = &text[body_start..body_end];

        let leading = head.leading.and_then(|re| re.find(body));
        let matched = leading.or_else(|| {
            if unmarked == Some(body_end) {
                return None;
            }
            let found = head.marker.find(body);
            if found.is_none() {
                unmarked = Some(body_end);
            }
            found
        });

        if let Some(head_match) = matched {
            let end = body_end + close.len();
            candidates.push(Candidate {
                start,
                end,
                raw: &body[head_match.end()..],
            });
            pos = end;
        } else {
            // Openers are ASCII, so this stays on a char boundary
            pos = start + 1;
        }
    }

    candidates
}

/// Turn a decorated comment body into diagram code.
pub(crate) fn clean_code(raw: &str, strip_line: fn(&str) -> &str, patterns: &Patterns) -> String {
    let stripped: Vec<&str> = raw
        .split('\n')
        .map(|line| strip_line(line).trim_end())
        .collect();
    let lines = remove_common_indentation(&stripped);
    extract_diagram(&lines, patterns)
}

/// Strip the indentation shared by all non-blank lines from every line.
///
/// Blank lines shorter than that indentation become empty.
pub(crate) fn remove_common_indentation<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    match indent {
        Some(indent) if indent > 0 => lines
            .iter()
            .map(|&line| {
                line.char_indices()
                    .nth(indent)
                    .map_or("", |(offset, _)| &line[offset..])
            })
            .collect(),
        _ => lines.to_vec(),
    }
}

/// Keep the lines from the first diagram keyword up to the end of the diagram.
///
/// Without any keyword the whole text is returned, trimmed.
pub(crate) fn extract_diagram(lines: &[&str], patterns: &Patterns) -> String {
    let mut diagram: Vec<&str> = Vec::new();
    let mut started = false;
    let mut blank_run = 0;

    for &line in lines {
        let trimmed = line.trim();

        if !started {
            if patterns.is_diagram_start(trimmed) {
                started = true;
                diagram.push(line);
            }
            continue;
        }

        if patterns.is_doc_header(trimmed) {
            break;
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
        } else {
            blank_run = 0;
        }
        diagram.push(line);
    }

    if started {
        diagram.join("\n").trim().to_owned()
    } else {
        lines.join("\n").trim().to_owned()
    }
}

/// Whether cleaned code is too short or looks like the extension's settings.
pub(crate) fn is_invalid_code(code: &str) -> bool {
    code.chars().count() < MIN_CODE_CHARS
        || SETTINGS_MARKERS.iter().any(|marker| code.contains(marker))
}

/// Byte offset to zero-based line lookup.
pub(crate) struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            newlines: text.match_indices('\n').map(|(i, _)| i).collect(),
        }
    }

    /// Number of newlines before `offset`.
    pub(crate) fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&i| i < offset)
    }

    /// Lines spanned by the byte interval `start..end`.
    pub(crate) fn range(&self, start: usize, end: usize) -> Option<CodeRange> {
        if end <= start {
            return None;
        }
        let start = LineNumber::try_from(self.line_of(start)).ok()?;
        let end = LineNumber::try_from(self.line_of(end)).ok()?;
        CodeRange::new(start, end).ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn patterns() -> &'static Patterns {
        Patterns::get().unwrap()
    }

    fn identity(line: &str) -> &str {
        line
    }

    fn extract(lines: &[&str]) -> String {
        extract_diagram(lines, patterns())
    }

    #[test]
    fn test_length_guard() {
        assert!(check_length("short text").is_ok());
        assert!(check_length(&"a".repeat(MAX_TEXT_CHARS)).is_ok());
        assert_eq!(
            check_length(&"a".repeat(MAX_TEXT_CHARS + 1)),
            Err(ParseError::TooLong {
                len: MAX_TEXT_CHARS + 1,
                max: MAX_TEXT_CHARS
            })
        );
    }

    #[test]
    fn test_length_guard_counts_characters() {
        // Three bytes per character, but under the character limit
        let text = "図".repeat(MAX_TEXT_CHARS / 2);
        assert!(text.len() > MAX_TEXT_CHARS);
        assert!(check_length(&text).is_ok());
    }

    #[test]
    fn test_too_long_message() {
        let err = check_length(&"a".repeat(MAX_TEXT_CHARS + 1)).unwrap_err();
        assert!(err.to_string().starts_with("text too long to parse safely"));
    }

    #[test]
    fn test_remove_common_indentation() {
        let lines = ["    line 1", "    line 2", "      nested"];
        assert_eq!(
            remove_common_indentation(&lines),
            vec!["line 1", "line 2", "  nested"]
        );
    }

    #[test]
    fn test_remove_mixed_indentation() {
        let lines = ["  line 1", "    line 2", " line 3"];
        assert_eq!(
            remove_common_indentation(&lines),
            vec![" line 1", "   line 2", "line 3"]
        );
    }

    #[test]
    fn test_indentation_ignores_blank_lines() {
        let lines = ["    line 1", "", "  ", "    line 2"];
        assert_eq!(
            remove_common_indentation(&lines),
            vec!["line 1", "", "", "line 2"]
        );
    }

    #[test]
    fn test_indentation_cut_from_long_blank_lines() {
        let lines = ["  a", "      ", "  b"];
        assert_eq!(remove_common_indentation(&lines), vec!["a", "    ", "b"]);
    }

    #[test]
    fn test_indentation_all_blank() {
        let lines = ["", "   "];
        assert_eq!(remove_common_indentation(&lines), vec!["", "   "]);
    }

    #[test]
    fn test_extract_simple_block() {
        assert_eq!(extract(&["graph TD", "A-->B"]), "graph TD\nA-->B");
    }

    #[test]
    fn test_extract_skips_leading_prose() {
        let lines = ["", "Shows the request flow.", "", "sequenceDiagram", "  A->>B: hi"];
        assert_eq!(extract(&lines), "sequenceDiagram\n  A->>B: hi");
    }

    #[test]
    fn test_extract_stops_at_doc_header() {
        let lines = ["graph TD", "A-->B", "", "Usage:", "Run command"];
        assert_eq!(extract(&lines), "graph TD\nA-->B");
    }

    #[test]
    fn test_extract_stops_at_markdown_heading() {
        let lines = ["flowchart LR", "  A --> B", "## Details", "text"];
        assert_eq!(extract(&lines), "flowchart LR\n  A --> B");
    }

    #[test]
    fn test_extract_stops_at_two_blank_lines() {
        let lines = ["graph TD", "A-->B", "", "", "Some other text"];
        assert_eq!(extract(&lines), "graph TD\nA-->B");
    }

    #[test]
    fn test_extract_keeps_single_blank_line() {
        let lines = ["sequenceDiagram", "participant A", "", "A->>A: loop", ""];
        assert_eq!(
            extract(&lines),
            "sequenceDiagram\nparticipant A\n\nA->>A: loop"
        );
    }

    #[test]
    fn test_extract_falls_back_to_whole_text() {
        let lines = ["", "A --> B", "B --> C", ""];
        assert_eq!(extract(&lines), "A --> B\nB --> C");
    }

    #[test]
    fn test_extract_starts_at_directive() {
        let lines = ["%%{init: {'theme': 'dark'}}%%", "graph TD", "A-->B"];
        assert_eq!(
            extract(&lines),
            "%%{init: {'theme': 'dark'}}%%\ngraph TD\nA-->B"
        );
    }

    #[test]
    fn test_clean_code_pipeline() {
        let raw = "\n    Overview of states.\n\n    stateDiagram-v2\n      [*] --> Idle\n\n\n    trailing";
        assert_eq!(
            clean_code(raw, identity, patterns()),
            "stateDiagram-v2\n  [*] --> Idle"
        );
    }

    #[test]
    fn test_invalid_code() {
        assert!(is_invalid_code(""));
        assert!(is_invalid_code("ab"));
        assert!(is_invalid_code("\"mermaidInlineViewer\": {"));
        assert!(is_invalid_code("{ \"theme\": { \"dark\": true } }"));
        assert!(!is_invalid_code("pie"));
        assert!(!is_invalid_code("graph TD"));
    }

    #[test]
    fn test_line_index() {
        let text = "line0\nline1\nline2";
        let index = LineIndex::new(text);
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(5), 0);
        assert_eq!(index.line_of(6), 1);
        assert_eq!(index.line_of(text.len()), 2);
    }

    #[test]
    fn test_line_index_range() {
        let text = "a\nb\n/* x\ny */\nc";
        let index = LineIndex::new(text);
        let start = text.find("/*").unwrap();
        let end = text.find("*/").unwrap() + 2;
        let range = index.range(start, end).unwrap();
        assert_eq!(range.start().get(), 2);
        assert_eq!(range.end().get(), 3);
        assert!(index.range(4, 4).is_none());
    }

    fn marker_only(marker: &Regex) -> Head<'_> {
        Head {
            leading: None,
            marker,
        }
    }

    #[test]
    fn test_scan_delimited_does_not_cross_closers() {
        let marker = Regex::new("mark").unwrap();
        let text = "/* one */ code /* two mark body */";
        let found = scan_delimited(text, "/*", "*/", marker_only(&marker));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, text.find("/* two").unwrap());
        assert_eq!(found[0].end, text.len());
        assert_eq!(found[0].raw, " body ");
    }

    #[test]
    fn test_scan_delimited_retries_nested_opener() {
        let leading = Regex::new(r"\A\s*mark").unwrap();
        let marker = Regex::new("@mark").unwrap();
        let head = Head {
            leading: Some(&leading),
            marker: &marker,
        };
        let text = "/* outer /* mark inner */";
        let found = scan_delimited(text, "/*", "*/", head);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, text.find("/* mark").unwrap());
        assert_eq!(found[0].raw, " inner ");
    }

    #[test]
    fn test_scan_delimited_marker_claims_outer_opener() {
        let leading = Regex::new(r"\A\s*mark").unwrap();
        let marker = Regex::new("@mark").unwrap();
        let head = Head {
            leading: Some(&leading),
            marker: &marker,
        };
        let text = "/* outer /* mark @mark body */ /* mark tail */";
        let found = scan_delimited(text, "/*", "*/", head);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 0);
        assert_eq!(found[0].raw, " body ");
        assert_eq!(found[1].start, text.find("/* mark tail").unwrap());
    }

    #[test]
    fn test_scan_delimited_shared_closer_per_segment() {
        let leading = Regex::new(r"\A\s*mark").unwrap();
        let marker = Regex::new("@mark").unwrap();
        let head = Head {
            leading: Some(&leading),
            marker: &marker,
        };
        // A closer directly followed by an opener starts a new segment
        let text = "/* a /* b */* mark c */";
        let found = scan_delimited(text, "/*", "*/", head);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, text.find("/* mark").unwrap());
        assert_eq!(found[0].end, text.len());
    }

    #[test]
    fn test_scan_delimited_unclosed() {
        let marker = Regex::new("").unwrap();
        assert!(scan_delimited("/* never closed", "/*", "*/", marker_only(&marker)).is_empty());
    }

    #[test]
    #[ignore = "timing-sensitive, can be flaky in test environments"]
    fn test_scan_delimited_many_openers_one_closer() {
        let patterns = patterns();
        let mut text = "/* x ".repeat(199_000);
        text.push_str("*/");
        assert!(text.len() <= MAX_TEXT_CHARS);

        let started = std::time::Instant::now();
        let found = scan_delimited(&text, "/*", "*/", patterns.block_head());
        assert!(found.is_empty());
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "took {:?}",
            started.elapsed()
        );
    }
}
