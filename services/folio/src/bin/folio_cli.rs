//! Folio CLI - build and query the blog search index
//!
//! # Examples
//!
//! ```bash
//! # Build the index from the configured posts directory
//! folio build-index
//!
//! # Typo-tolerant search, second page
//! folio search "kafak" --page 2
//!
//! # Filter by category and tag
//! folio search --category Backend --tag rust
//!
//! # Categories and tags with counts
//! folio list-facets --format json
//! ```

use clap::Parser;
use folio::cli::{run, Cli};
use folio::core::logging::{init_tracing, CLI_DEFAULT_FILTER};

fn main() {
    init_tracing(CLI_DEFAULT_FILTER, true);

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
