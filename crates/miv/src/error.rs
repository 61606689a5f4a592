//! CLI error types.

use std::path::PathBuf;

use miv_config::ConfigError;
use miv_core::UnknownLanguage;
use miv_parser::ParseError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Language(#[from] UnknownLanguage),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No diagram at {}:{line}", path.display())]
    NoDiagram { path: PathBuf, line: u32 },

    #[error("{0}")]
    Validation(String),
}
