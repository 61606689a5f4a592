//! Source languages that can carry embedded diagrams.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Supported source languages, keyed by editor language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    TypeScriptReact,
    JavaScript,
    JavaScriptReact,
    Python,
    Go,
    Rust,
}

/// Error returned for an unrecognized language identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 7] = [
        Self::TypeScript,
        Self::TypeScriptReact,
        Self::JavaScript,
        Self::JavaScriptReact,
        Self::Python,
        Self::Go,
        Self::Rust,
    ];

    /// Editor language identifier (e.g. `typescriptreact`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::TypeScriptReact => "typescriptreact",
            Self::JavaScript => "javascript",
            Self::JavaScriptReact => "javascriptreact",
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    /// File extensions (without the leading dot) mapped to this language.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::TypeScriptReact => &["tsx"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::JavaScriptReact => &["jsx"],
            Self::Python => &["py", "pyi"],
            Self::Go => &["go"],
            Self::Rust => &["rs"],
        }
    }

    /// Guess the language from a file extension (without the leading dot).
    ///
    /// Matching is case-insensitive. Returns `None` for unsupported extensions.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
