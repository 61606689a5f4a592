//! `miv at` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use miv_config::Config;
use miv_core::{DiagramBlock, Language, LineNumber};
use miv_parser::ParserRegistry;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the at command.
#[derive(Args)]
pub(crate) struct AtArgs {
    /// Source file to parse.
    file: PathBuf,

    /// Line number, starting at 1.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    line: u32,

    /// Language id (default: guessed from the file extension).
    #[arg(short, long)]
    language: Option<String>,

    /// Path to configuration file (default: auto-discover miv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl AtArgs {
    /// Execute the at command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, its language is
    /// unknown, or no diagram covers the line.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.file.exists() {
            return Err(CliError::NotFound(self.file));
        }
        let config = Config::load(self.config.as_deref(), None)?;
        let language = resolve_language(&self.file, self.language.as_deref(), &config)?;

        let text = std::fs::read_to_string(&self.file)?;
        let blocks = ParserRegistry::global().parse_document(&text, language)?;

        let block = find_block(&blocks, self.line).ok_or_else(|| CliError::NoDiagram {
            path: self.file.clone(),
            line: self.line,
        })?;
        output.data(block.code().as_str());
        Ok(())
    }
}

/// Language from `--language`, falling back to the file extension.
fn resolve_language(
    file: &Path,
    language: Option<&str>,
    config: &Config,
) -> Result<Language, CliError> {
    if let Some(id) = language {
        return Ok(id.parse::<Language>()?);
    }
    config.language_for_path(file).ok_or_else(|| {
        CliError::Validation(format!(
            "Cannot determine language of {}, pass --language",
            file.display()
        ))
    })
}

/// Block covering the 1-based `line`.
fn find_block(blocks: &[DiagramBlock], line: u32) -> Option<&DiagramBlock> {
    let line = LineNumber::from(line.checked_sub(1)?);
    miv_parser::block_at(blocks, line)
}
