//! Extraction of diagram blocks from source-code comments.
//!
//! Each supported [`Language`] has a [`CommentParser`] that finds comments
//! announcing a diagram (`mermaid`, `@mermaid` or `Mermaid:`) and returns the
//! diagram markup inside as [`DiagramBlock`]s:
//!
//! - [`TypeScriptParser`]: `/* ... */` and `/** ... */` (TypeScript, JavaScript, JSX)
//! - [`GoParser`]: `/* ... */`
//! - [`RustParser`]: `/* ... */` and `//!` doc comment runs
//! - [`PythonParser`]: `"""..."""` and `'''...'''` docstrings
//!
//! Parsers are stateless. [`ParserRegistry::global`] hands out shared
//! instances by language.
//!
//! # Example
//!
//! ```
//! use miv_core::Language;
//! use miv_parser::ParserRegistry;
//!
//! let text = "/**\n * @mermaid\n * graph TD\n *   A --> B\n */\nfunction f() {}";
//! let blocks = ParserRegistry::global()
//!     .parse_document(text, Language::TypeScript)
//!     .unwrap();
//!
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].code().as_str(), "graph TD\n  A --> B");
//! ```

mod block;
mod engine;
mod error;
mod parser;
mod patterns;
mod python;
mod registry;
mod rust;

pub use block::{GoParser, TypeScriptParser};
pub use engine::MAX_TEXT_CHARS;
pub use error::ParseError;
pub use parser::CommentParser;
pub use python::PythonParser;
pub use registry::ParserRegistry;
pub use rust::RustParser;

use miv_core::{DiagramBlock, LineNumber};

/// First block whose range covers `line`.
#[must_use]
pub fn block_at(blocks: &[DiagramBlock], line: LineNumber) -> Option<&DiagramBlock> {
    blocks.iter().find(|block| block.range().contains(line))
}
