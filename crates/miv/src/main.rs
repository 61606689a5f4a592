//! miv CLI - extract mermaid diagrams from source-code comments.
//!
//! Provides commands for:
//! - `scan`: Find diagrams in files and directories
//! - `at`: Print the diagram covering a line of a file
//! - `languages`: List supported languages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AtArgs, LanguagesArgs, ScanArgs};
use output::Output;

/// miv - mermaid diagrams in code comments.
#[derive(Parser)]
#[command(name = "miv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find diagrams in files and directories.
    Scan(ScanArgs),
    /// Print the diagram covering a line of a file.
    At(AtArgs),
    /// List supported languages and file extensions.
    Languages(LanguagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Scan(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Scan(args) => args.execute(),
        Commands::At(args) => args.execute(),
        Commands::Languages(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
