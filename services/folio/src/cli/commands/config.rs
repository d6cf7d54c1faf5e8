//! Config command - show current configuration

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the configuration as a TOML file
    #[arg(long)]
    pub toml: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();

    if args.toml {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    let response = ConfigResponse {
        config_file: XdgDirs::new().config_file().display().to_string(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  content:");
            println!("    posts_dir: {}", config.content.posts_dir.display());
            println!("    extension: {}", config.content.extension);
            println!("    recursive: {}", config.content.recursive);
            println!("    exclude_patterns: {:?}", config.content.exclude_patterns);
            println!("    max_file_size_kb: {}", config.content.max_file_size_kb);
            println!("    excerpt_chars: {}", config.content.excerpt_chars);
            println!("  storage:");
            println!("    index_file: {}", config.storage.index_file.display());
            println!("  search:");
            println!("    default_page_size: {}", config.search.default_page_size);
            println!("    max_page_size: {}", config.search.max_page_size);
            println!("    threshold: {}", config.search.threshold);
            println!("    min_match_chars: {}", config.search.min_match_chars);
            for (field, weight) in config.search.weights.entries() {
                println!("    weight.{field}: {weight}");
            }
            println!("  server:");
            println!("    listen: {}:{}", config.server.host, config.server.port);
            println!("    build_on_start: {}", config.server.build_on_start);
        }
        OutputFormat::Json => print_json(&response, format)?,
    }

    Ok(())
}
