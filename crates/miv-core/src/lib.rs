//! Core value types for diagram extraction.
//!
//! Every value that crosses the parser boundary is validated at construction:
//!
//! - [`LineNumber`]: zero-based source line
//! - [`DiagramCode`]: trimmed, non-empty diagram markup
//! - [`CodeRange`]: inclusive `[start, end]` line interval
//! - [`DiagramBlock`]: diagram code bound to a range and a [`Language`]
//!
//! # Example
//!
//! ```
//! use miv_core::{CodeRange, DiagramBlock, DiagramCode, Language, LineNumber};
//!
//! let code = DiagramCode::new("  graph TD\n  A --> B  ").unwrap();
//! let range = CodeRange::new(LineNumber::new(2).unwrap(), LineNumber::new(5).unwrap()).unwrap();
//! let block = DiagramBlock::new(code, range, Language::Rust);
//!
//! assert_eq!(block.code().as_str(), "graph TD\n  A --> B");
//! assert!(block.range().contains(LineNumber::new(4).unwrap()));
//! ```

mod block;
mod language;
mod range;
mod types;

pub use block::DiagramBlock;
pub use language::{Language, UnknownLanguage};
pub use range::{CodeRange, RangeError};
pub use types::{DiagramCode, LineNumber, ValidationError};
