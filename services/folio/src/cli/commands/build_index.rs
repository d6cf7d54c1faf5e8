//! Build-index command - build the search index from posts

use crate::cli::output::{colors, format_duration_ms, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::types::BuildStats;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the build-index command
#[derive(Args, Debug)]
pub struct BuildIndexArgs {
    /// Directory holding the posts (defaults to content.posts_dir)
    #[arg(long, short = 'c')]
    pub content_dir: Option<PathBuf>,

    /// Where to write the index (defaults to storage.index_file)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also read posts in subdirectories
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl BuildIndexArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.content_dir {
            config.content.posts_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.storage.index_file = output.clone();
        }
        if self.recursive {
            config.content.recursive = true;
        }
    }
}

/// Build result response
#[derive(Debug, Serialize)]
pub struct BuildIndexResponse {
    pub content_dir: String,
    pub index_file: String,
    #[serde(flatten)]
    pub stats: BuildStats,
}

/// Execute the build-index command
pub fn execute(
    args: BuildIndexArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let content_dir = services.config.content.posts_dir.clone();

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Building index from {}...",
            colors::file_path(&content_dir.display().to_string())
        );
    }

    let stats = services.rebuild()?;

    let response = BuildIndexResponse {
        content_dir: content_dir.display().to_string(),
        index_file: services.store.index_file().path().display().to_string(),
        stats,
    };

    match format {
        OutputFormat::Human => {
            let stats = &response.stats;
            if stats.source_unavailable {
                print_warning(&format!(
                    "Content directory '{}' could not be read; wrote an empty index.",
                    response.content_dir
                ));
            }

            println!(
                "{} {} posts in {}",
                colors::success("Indexed"),
                colors::number(&stats.documents_indexed.to_string()),
                colors::number(&format_duration_ms(stats.duration_ms))
            );

            let dropped = stats.items_failed + stats.items_untitled + stats.duplicates;
            if dropped > 0 {
                println!(
                    "Dropped: {} malformed, {} untitled, {} duplicate ids",
                    colors::number(&stats.items_failed.to_string()),
                    colors::number(&stats.items_untitled.to_string()),
                    colors::number(&stats.duplicates.to_string())
                );
            }
            if stats.items_skipped > 0 {
                println!(
                    "Skipped: {} non-.{} files",
                    colors::number(&stats.items_skipped.to_string()),
                    services.config.content.extension
                );
            }

            println!("Index: {}", colors::file_path(&response.index_file));
        }
        OutputFormat::Json => print_json(&response, format)?,
    }

    Ok(())
}
