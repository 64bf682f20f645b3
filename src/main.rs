//! Mito review worker main executable

pub mod app;
pub mod common;
pub mod filters;
pub mod query;
pub mod settings;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Mito review app heavy lifting",
    long_about = "This tool performs the heavy lifting for the mitochondrial variant review app"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Variant query related commands.
    Query(query::Args),
    /// Settings related commands.
    Settings(Settings),
}

/// Parsing of "settings *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Settings {
    /// The sub command to run
    #[command(subcommand)]
    command: SettingsCommands,
}

/// Enum supporting the parsing of "settings *" sub commands.
#[derive(Debug, Subcommand)]
enum SettingsCommands {
    Export(settings::cli::export::Args),
    SaveSearch(settings::cli::save_search::Args),
    DeleteSearch(settings::cli::delete_search::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Query(args) => {
                query::run(&cli.common, args)?;
            }
            Commands::Settings(settings) => match &settings.command {
                SettingsCommands::Export(args) => {
                    settings::cli::export::run(&cli.common, args)?;
                }
                SettingsCommands::SaveSearch(args) => {
                    settings::cli::save_search::run(&cli.common, args)?;
                }
                SettingsCommands::DeleteSearch(args) => {
                    settings::cli::delete_search::run(&cli.common, args)?;
                }
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
