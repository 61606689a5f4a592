//! Language to parser lookup.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use miv_core::{DiagramBlock, Language};

use crate::{CommentParser, GoParser, ParseError, PythonParser, RustParser, TypeScriptParser};

static REGISTRY: LazyLock<ParserRegistry> = LazyLock::new(ParserRegistry::new);

/// Read-only table of parser instances, one entry per [`Language`].
///
/// The JavaScript family shares a single [`TypeScriptParser`].
pub struct ParserRegistry {
    parsers: HashMap<Language, Arc<dyn CommentParser>>,
}

impl ParserRegistry {
    fn new() -> Self {
        let script: Arc<dyn CommentParser> = Arc::new(TypeScriptParser);
        let mut parsers: HashMap<Language, Arc<dyn CommentParser>> = HashMap::new();
        for language in [
            Language::TypeScript,
            Language::TypeScriptReact,
            Language::JavaScript,
            Language::JavaScriptReact,
        ] {
            parsers.insert(language, Arc::clone(&script));
        }
        parsers.insert(Language::Python, Arc::new(PythonParser));
        parsers.insert(Language::Go, Arc::new(GoParser));
        parsers.insert(Language::Rust, Arc::new(RustParser));

        tracing::debug!(parsers = parsers.len(), "Initialized parser registry");
        Self { parsers }
    }

    /// Process-wide registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Copy of the language table.
    #[must_use]
    pub fn parsers(&self) -> HashMap<Language, Arc<dyn CommentParser>> {
        self.parsers.clone()
    }

    /// Parser for `language`.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<Arc<dyn CommentParser>> {
        self.parsers.get(&language).cloned()
    }

    /// Parser for a language identifier such as `"typescriptreact"`.
    ///
    /// Unknown identifiers yield `None`.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Arc<dyn CommentParser>> {
        let language = id.parse::<Language>().ok()?;
        self.get(language)
    }

    /// Parse `text` as `language`, tagging blocks with that language.
    ///
    /// # Errors
    ///
    /// Propagates the parser's [`ParseError`].
    pub fn parse_document(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<DiagramBlock>, ParseError> {
        match self.parsers.get(&language) {
            Some(parser) => parser.parse_as(text, language),
            None => Ok(Vec::new()),
        }
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut languages: Vec<_> = self.parsers.keys().collect();
        languages.sort();
        f.debug_struct("ParserRegistry")
            .field("languages", &languages)
            .finish()
    }
}
