//! `miv scan` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use ignore::WalkBuilder;
use miv_config::{CliSettings, Config};
use miv_core::{DiagramBlock, Language};
use miv_parser::ParserRegistry;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the scan command.
#[derive(Args)]
pub(crate) struct ScanArgs {
    /// Files or directories to scan (default: current directory).
    paths: Vec<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover miv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Descend into hidden files and directories.
    #[arg(long)]
    hidden: bool,

    /// Do not skip paths listed in .gitignore files.
    #[arg(long)]
    no_gitignore: bool,

    /// Skip paths matching this glob, relative to the scanned directory.
    #[arg(short, long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// A file selected for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFile {
    path: PathBuf,
    language: Language,
}

/// Diagrams found in one file.
#[derive(Debug, Serialize)]
struct FileBlocks {
    path: PathBuf,
    blocks: Vec<DiagramBlock>,
}

impl ScanArgs {
    /// Execute the scan command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a path does not
    /// exist. Unreadable or unparsable files are logged and skipped.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            hidden: self.hidden.then_some(true),
            respect_gitignore: self.no_gitignore.then_some(false),
            exclude: self.exclude.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let roots = if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths
        };
        if let Some(missing) = roots.iter().find(|root| !root.exists()) {
            return Err(CliError::NotFound(missing.clone()));
        }

        let files = collect_files(&roots, &config);
        tracing::info!(files = files.len(), "Collected source files");

        let results = parse_files(&files);

        if self.json {
            output.data(&serde_json::to_string_pretty(&results)?);
        } else {
            print_results(&output, &results);
        }

        let total: usize = results.iter().map(|file| file.blocks.len()).sum();
        if total == 0 {
            output.warning(&format!("No diagrams found in {} files", files.len()));
        } else {
            output.success(&format!(
                "Found {total} diagrams in {} of {} files",
                results.len(),
                files.len()
            ));
        }
        Ok(())
    }
}

/// Walk `roots` and pick the files with a supported language.
///
/// Explicitly named files are kept even when hidden, ignored or excluded.
fn collect_files(roots: &[PathBuf], config: &Config) -> Vec<SourceFile> {
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            match config.language_for_path(root) {
                Some(language) => files.push(SourceFile {
                    path: root.clone(),
                    language,
                }),
                None => tracing::warn!(path = %root.display(), "Unsupported file type"),
            }
            continue;
        }

        let respect_gitignore = config.scan.respect_gitignore;
        let walker = WalkBuilder::new(root)
            .hidden(!config.scan.hidden)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .require_git(false)
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if config.is_excluded(relative) {
                tracing::debug!(path = %path.display(), "Excluded by pattern");
                continue;
            }
            if let Some(language) = config.language_for_path(path) {
                files.push(SourceFile {
                    path: path.to_path_buf(),
                    language,
                });
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    files
}

/// Parse files in parallel, keeping those with at least one diagram.
fn parse_files(files: &[SourceFile]) -> Vec<FileBlocks> {
    let registry = ParserRegistry::global();
    files
        .par_iter()
        .filter_map(|file| parse_file(registry, file))
        .collect()
}

fn parse_file(registry: &ParserRegistry, file: &SourceFile) -> Option<FileBlocks> {
    let text = match std::fs::read_to_string(&file.path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %file.path.display(), error = %err, "Failed to read file");
            return None;
        }
    };

    let blocks = match registry.parse_document(&text, file.language) {
        Ok(blocks) => blocks,
        Err(err) => {
            tracing::warn!(path = %file.path.display(), error = %err, "Failed to parse file");
            return None;
        }
    };

    if blocks.is_empty() {
        return None;
    }
    tracing::debug!(path = %file.path.display(), blocks = blocks.len(), "Found diagrams");
    Some(FileBlocks {
        path: file.path.clone(),
        blocks,
    })
}

/// Print `path:start-end [language]` and the diagram code for each block.
///
/// Line numbers are printed 1-based.
fn print_results(output: &Output, results: &[FileBlocks]) {
    for file in results {
        for block in &file.blocks {
            output.heading(&location(&file.path, block));
            output.data(block.code().as_str());
            output.data("");
        }
    }
}

fn location(path: &Path, block: &DiagramBlock) -> String {
    let range = block.range();
    format!(
        "{}:{}-{} [{}]",
        path.display(),
        u64::from(range.start().get()) + 1,
        u64::from(range.end().get()) + 1,
        block.language()
    )
}
