//! Search command - search the index

use crate::cli::output::{colors, print_json, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::types::{SearchParams, SearchResponse};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term (typo tolerant)
    pub term: Option<String>,

    /// Only posts in this category (exact, case-insensitive)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only posts carrying this tag (exact, case-insensitive)
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Page number, starting at 1
    #[arg(long, short = 'p')]
    pub page: Option<String>,

    /// Results per page
    #[arg(long, short = 'l')]
    pub limit: Option<String>,

    /// Index file to search (defaults to storage.index_file)
    #[arg(long)]
    pub index: Option<PathBuf>,
}

impl SearchArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(index) = &self.index {
            config.storage.index_file = index.clone();
        }
    }
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.store.load().map_err(|e| {
        if e.is_not_found() {
            format!(
                "No search index at '{}'. Run 'folio build-index' first.",
                services.store.index_file().path().display()
            )
        } else {
            e.to_string()
        }
    })?;

    let term = args.term.clone();
    let result = services.search(SearchParams {
        query: args.term,
        category: args.category,
        tag: args.tag,
        page: args.page,
        limit: args.limit,
    })?;
    let response = SearchResponse::from(result);

    match format {
        OutputFormat::Human => print_human(&response, term.as_deref()),
        OutputFormat::Json => print_json(&response, format)?,
    }

    Ok(())
}

fn print_human(response: &SearchResponse, term: Option<&str>) {
    if response.results.is_empty() {
        match term {
            Some(term) => println!("No posts found for '{}'", colors::label(term)),
            None => println!("No posts found"),
        }
        return;
    }

    println!(
        "Found {} post(s), page {} of {}:\n",
        colors::number(&response.total_results.to_string()),
        colors::number(&response.page.to_string()),
        colors::number(&response.total_pages.to_string())
    );

    for (i, hit) in response.results.iter().enumerate() {
        let doc = &hit.document;
        let score = hit
            .relevance_score
            .map(|s| format!(" {}", colors::score(&format!("(relevance: {s:.2})"))))
            .unwrap_or_default();

        println!(
            "[{}] {} {}{}",
            colors::rank(&(i + 1).to_string()),
            colors::label(&doc.title),
            colors::doc_id(&doc.id),
            score
        );

        let mut meta = vec![
            doc.published_at.format("%Y-%m-%d").to_string(),
            doc.reading_time_label(),
        ];
        if let Some(category) = &doc.category {
            meta.push(category.clone());
        }
        println!("    {}", colors::dim(&meta.join(" · ")));

        if !doc.tags.is_empty() {
            let tags: Vec<String> = doc
                .tags
                .iter()
                .map(|t| colors::facet(&format!("#{t}")).to_string())
                .collect();
            println!("    {}", tags.join(" "));
        }

        let summary = if doc.description.is_empty() {
            &doc.body
        } else {
            &doc.description
        };
        if !summary.is_empty() {
            println!("    {}", colors::dim(&truncate_chars(summary, 100)));
        }
        println!();
    }
}
