//! Info command - show version and index information

use crate::cli::output::{colors, format_bytes, format_relative_time, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::storage::IndexMetadata;
use clap::Args;
use serde::Serialize;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Also load the index and report category and tag counts
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Server information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub index_file: String,
    pub listen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<usize>,
}

/// Execute the info command
pub fn execute(
    args: InfoArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let index_file = services.store.index_file();

    // A missing index is reported, not an error
    let index = match index_file.read_metadata() {
        Ok(meta) => Some(meta),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    let (categories, tags) = if args.detailed && index.is_some() {
        services.store.load()?;
        let facets = services.facets()?;
        (Some(facets.categories.len()), Some(facets.tags.len()))
    } else {
        (None, None)
    };

    let info = InfoResponse {
        name: "folio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        index_file: index_file.path().display().to_string(),
        listen: format!(
            "{}:{}",
            services.config.server.host, services.config.server.port
        ),
        index,
        categories,
        tags,
    };

    match format {
        OutputFormat::Human => {
            println!("folio {}", info.version);
            println!("Listen: {}", info.listen);
            println!("Index: {}", colors::file_path(&info.index_file));
            match &info.index {
                Some(meta) => {
                    println!(
                        "  {} posts, {} (schema v{})",
                        colors::number(&meta.documents.to_string()),
                        format_bytes(meta.index_size_bytes),
                        meta.schema_version
                    );
                    println!(
                        "  Built {} from {}",
                        colors::dim(&format_relative_time(&meta.built_at)),
                        meta.source
                    );
                }
                None => println!("  {}", colors::warning("not built yet")),
            }
            if let (Some(categories), Some(tags)) = (info.categories, info.tags) {
                println!("Categories: {categories}");
                println!("Tags: {tags}");
            }
        }
        OutputFormat::Json => print_json(&info, format)?,
    }

    Ok(())
}
