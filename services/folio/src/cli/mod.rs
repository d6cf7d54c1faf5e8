//! CLI adapter for Folio
//!
//! Provides a command-line interface for building the search index
//! and querying it. This module is parallel to `http/`: both depend on
//! `core/` but not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! |  (axum adapter)  |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::services::Services;

/// Folio - blog search index builder
///
/// Builds a search index from markdown posts with YAML front matter
/// and runs typo-tolerant searches against it.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Blog search index builder and fuzzy search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
///
/// Command names match the HTTP endpoints where one exists.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the search index from the posts directory
    #[command(name = "build-index")]
    BuildIndex(commands::BuildIndexArgs),

    /// Search the index by term, category or tag
    Search(commands::SearchArgs),

    /// List categories and tags with post counts
    #[command(name = "list-facets")]
    ListFacets(commands::FacetsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version and index information
    #[command(name = "get-server-info")]
    GetServerInfo(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  folio completions bash > ~/.local/share/bash-completion/completions/folio
    ///   zsh:   folio completions zsh > ~/.zfunc/_folio
    ///   fish:  folio completions fish > ~/.config/fish/completions/folio.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let mut config = Config::load()?;

    // Per-command overrides of the loaded configuration
    match &cli.command {
        Commands::BuildIndex(args) => args.apply(&mut config),
        Commands::Search(args) => args.apply(&mut config),
        Commands::ListFacets(args) => args.apply(&mut config),
        _ => {}
    }
    config.validate()?;

    let services = Services::new(config);

    match cli.command {
        Commands::BuildIndex(args) => commands::build_index::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::ListFacets(args) => commands::facets::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::GetServerInfo(args) => commands::info::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
