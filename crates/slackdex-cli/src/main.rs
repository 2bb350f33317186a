//! # slackdex CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; each subcommand keeps the flag names and
//! output layout of the script it replaced.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slackdex_cli::api::{run_api, ApiArgs};
use slackdex_cli::check::{run_check, CheckArgs};
use slackdex_cli::coverage::{run_coverage, CoverageArgs};
use slackdex_cli::tables::{run_tables, TablesArgs};

/// slackdex — Slack CLI tools comparison toolkit
///
/// Validates the YAML project descriptors, renders the markdown
/// comparison tables, and cross-references declared API coverage
/// against the archived Slack OpenAPI spec.
#[derive(Parser, Debug)]
#[command(name = "slackdex", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate project descriptors against the schema rules.
    Check(CheckArgs),

    /// Generate markdown comparison tables from project descriptors.
    Tables(TablesArgs),

    /// Inspect the archived Slack OpenAPI method catalog.
    Api(ApiArgs),

    /// Cross-reference declared API coverage against the OpenAPI spec.
    Coverage(CoverageArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Resolve the repository root: walk up from CWD looking for `projects/`.
    let repo_root = resolve_repo_root().unwrap_or_else(|| {
        tracing::debug!("could not locate repository root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &repo_root, cli.verbose),
        Commands::Tables(args) => run_tables(&args, &repo_root),
        Commands::Api(args) => run_api(&args, &repo_root),
        Commands::Coverage(args) => run_coverage(&args, &repo_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Walk up from the current directory to find the repository root.
///
/// The root is identified by the presence of a `projects/` directory,
/// matching the descriptor repository layout.
fn resolve_repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join("projects").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
