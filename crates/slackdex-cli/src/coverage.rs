//! # Coverage Subcommand
//!
//! Joins the descriptor catalog against the OpenAPI method catalog and
//! emits the API coverage comparison report. Section flags select
//! individual sections; `--all` or no flags at all emits everything.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use slackdex_openapi::ApiCatalog;
use slackdex_report::coverage::{coverage_report, CoverageSections};
use slackdex_schema::Catalog;

/// Arguments for the `slackdex coverage` subcommand.
#[derive(Args, Debug, Default)]
pub struct CoverageArgs {
    /// Coverage by API category.
    #[arg(long)]
    pub by_category: bool,

    /// Coverage summary by tool.
    #[arg(long)]
    pub by_tool: bool,

    /// High-level summary.
    #[arg(long)]
    pub summary: bool,

    /// Show coverage gaps.
    #[arg(long)]
    pub gaps: bool,

    /// Generate all tables.
    #[arg(long)]
    pub all: bool,

    /// Output file path (default: stdout).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to the OpenAPI spec file.
    #[arg(long, default_value = crate::DEFAULT_SPEC_PATH)]
    pub spec_path: PathBuf,

    /// Directory containing the YAML project descriptors.
    #[arg(long, default_value = crate::DEFAULT_PROJECTS_DIR)]
    pub projects_dir: PathBuf,
}

/// Execute the coverage subcommand.
///
/// Returns exit code 0 on success, 1 when the spec or the descriptor
/// directory is missing.
pub fn run_coverage(args: &CoverageArgs, repo_root: &Path) -> Result<u8> {
    let spec_path = crate::resolve_path(&args.spec_path, repo_root);
    if !spec_path.exists() {
        println!("Error: OpenAPI spec not found at {}", spec_path.display());
        return Ok(1);
    }

    let projects_dir = crate::resolve_path(&args.projects_dir, repo_root);
    if !projects_dir.is_dir() {
        println!("Error: Projects directory not found at {}", projects_dir.display());
        return Ok(1);
    }

    let api_catalog = ApiCatalog::load(&spec_path).context("failed to load OpenAPI spec")?;
    let catalog = Catalog::load(&projects_dir).context("failed to load project descriptors")?;
    crate::log_catalog_skips(&catalog);

    tracing::info!(
        methods = api_catalog.total_methods(),
        projects = catalog.len(),
        "cross-referencing API coverage"
    );

    let mut sections = CoverageSections {
        summary: args.summary,
        by_tool: args.by_tool,
        by_category: args.by_category,
        gaps: args.gaps,
    };
    if args.all || !sections.any() {
        sections = CoverageSections::all();
    }

    let projects = catalog.into_descriptors();
    let output = coverage_report(&projects, &api_catalog, sections);
    crate::write_output(args.output.as_deref(), &output)?;
    Ok(0)
}
