//! List-facets command - categories and tags with post counts

use crate::cli::output::{colors, print_header, print_json};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::types::FacetCount;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the list-facets command
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Index file to read (defaults to storage.index_file)
    #[arg(long)]
    pub index: Option<PathBuf>,
}

impl FacetsArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(index) = &self.index {
            config.storage.index_file = index.clone();
        }
    }
}

/// Execute the list-facets command
pub fn execute(
    _args: FacetsArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.store.load()?;
    let facets = services.facets()?;

    match format {
        OutputFormat::Human => {
            print_header("Categories:");
            print_counts(&facets.categories);
            println!();
            print_header("Tags:");
            print_counts(&facets.tags);
        }
        OutputFormat::Json => print_json(&facets, format)?,
    }

    Ok(())
}

fn print_counts(counts: &[FacetCount]) {
    if counts.is_empty() {
        println!("  {}", colors::dim("(none)"));
        return;
    }

    for facet in counts {
        println!(
            "  {} {}",
            colors::facet(&facet.name),
            colors::number(&format!("({})", facet.count))
        );
    }
}
