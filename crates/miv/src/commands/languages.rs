//! `miv languages` command implementation.

use std::path::PathBuf;

use clap::Args;
use miv_config::Config;
use miv_core::Language;
use miv_parser::ParserRegistry;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the languages command.
#[derive(Args)]
pub(crate) struct LanguagesArgs {
    /// Path to configuration file (default: auto-discover miv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl LanguagesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = ParserRegistry::global();

        for language in Language::ALL {
            output.data(&describe(registry, &config, language));
        }
        Ok(())
    }
}

/// One line per language: id, extensions, and the parser serving it.
fn describe(registry: &ParserRegistry, config: &Config, language: Language) -> String {
    let mut extensions: Vec<String> = language
        .extensions()
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect();
    let mut extra: Vec<String> = config
        .languages
        .extensions
        .iter()
        .filter(|(_, id)| id.as_str() == language.as_str())
        .map(|(ext, _)| format!(".{}", ext.trim_start_matches('.').to_ascii_lowercase()))
        .collect();
    extra.sort();
    extensions.extend(extra);

    let parser = registry
        .get(language)
        .map_or("none", |parser| parser.language().as_str());
    format!(
        "{:<16} {:<20} parser: {parser}",
        language.as_str(),
        extensions.join(" ")
    )
}
