//! # Api Subcommand
//!
//! Terminal views over the archived Slack OpenAPI method catalog: a
//! plain method listing, a per-category summary table, a flat name
//! list for scripting, and the full JSON export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use slackdex_openapi::ApiCatalog;

/// Arguments for the `slackdex api` subcommand.
#[derive(Args, Debug, Default)]
pub struct ApiArgs {
    /// Output full JSON.
    #[arg(long)]
    pub json: bool,

    /// Output summary only.
    #[arg(long)]
    pub summary: bool,

    /// List all method names.
    #[arg(long)]
    pub list_methods: bool,

    /// Filter to a specific category.
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Path to the OpenAPI spec file.
    #[arg(long, default_value = crate::DEFAULT_SPEC_PATH)]
    pub spec_path: PathBuf,
}

/// Execute the api subcommand.
///
/// Returns exit code 0 on success, 1 when the spec is missing or the
/// requested category does not exist.
pub fn run_api(args: &ApiArgs, repo_root: &Path) -> Result<u8> {
    let spec_path = crate::resolve_path(&args.spec_path, repo_root);
    if !spec_path.exists() {
        println!("Error: OpenAPI spec not found at {}", spec_path.display());
        return Ok(1);
    }

    let catalog = ApiCatalog::load(&spec_path).context("failed to load OpenAPI spec")?;
    tracing::info!(
        methods = catalog.total_methods(),
        categories = catalog.total_categories(),
        "loaded OpenAPI method catalog"
    );

    // --category narrows the catalog before any output mode runs.
    let catalog = match args.category.as_deref() {
        Some(name) => match catalog.filter_category(name) {
            Some(filtered) => filtered,
            None => {
                println!("Error: Category '{name}' not found");
                println!("Available categories: {}", catalog.category_names().join(", "));
                return Ok(1);
            }
        },
        None => catalog,
    };

    if args.list_methods {
        for method in catalog.method_names() {
            println!("{method}");
        }
    } else if args.summary {
        print_summary(&catalog);
    } else if args.json {
        let rendered = serde_json::to_string_pretty(&catalog.export())
            .context("failed to serialize method catalog")?;
        println!("{rendered}");
    } else {
        print_method_listing(&catalog);
    }

    Ok(0)
}

/// Categories ordered by method count descending, name breaking ties.
fn ranked_categories(catalog: &ApiCatalog) -> Vec<(&str, usize)> {
    let mut rows: Vec<(&str, usize)> = catalog
        .methods
        .iter()
        .map(|(category, methods)| (category.as_str(), methods.len()))
        .collect();
    // The map iterates alphabetically, so the stable sort keeps name
    // order for equal counts.
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// The `--summary` table: totals plus an aligned per-category count column.
fn print_summary(catalog: &ApiCatalog) {
    println!("Slack Web API Methods Summary");
    println!("{}", "=".repeat(50));
    println!("Total Methods: {}", catalog.total_methods());
    println!("Total Categories: {}", catalog.total_categories());
    println!();
    println!("{:<20} {:>8}", "Category", "Methods");
    println!("{} {}", "-".repeat(20), "-".repeat(8));
    for (category, count) in ranked_categories(catalog) {
        println!("{category:<20} {count:>8}");
    }
}

/// The default view: totals, then every method grouped by category.
fn print_method_listing(catalog: &ApiCatalog) {
    println!("Slack Web API Methods");
    println!("{}", "=".repeat(60));
    println!(
        "Total: {} methods in {} categories",
        catalog.total_methods(),
        catalog.total_categories()
    );
    println!();

    for (category, count) in ranked_categories(catalog) {
        println!("\n{category} ({count} methods):");
        if let Some(methods) = catalog.category(category) {
            for method in methods.keys() {
                println!("  - {method}");
            }
        }
    }
}
