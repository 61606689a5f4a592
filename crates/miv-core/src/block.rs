//! Extracted diagram blocks.

use serde::Serialize;
use uuid::Uuid;

use crate::{CodeRange, DiagramCode, Language};

/// A diagram found in a document, bound to the lines it was extracted from.
///
/// Blocks are created fresh on every parse; the `id` is a random v4 UUID and
/// differs between parses of the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramBlock {
    id: Uuid,
    code: DiagramCode,
    range: CodeRange,
    language: Language,
}

impl DiagramBlock {
    /// Create a block with a freshly generated identifier.
    #[must_use]
    pub fn new(code: DiagramCode, range: CodeRange, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            range,
            language,
        }
    }

    /// Opaque unique identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Diagram markup.
    #[must_use]
    pub fn code(&self) -> &DiagramCode {
        &self.code
    }

    /// Source lines the diagram was extracted from.
    #[must_use]
    pub fn range(&self) -> CodeRange {
        self.range
    }

    /// Source language of the document.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }
}
