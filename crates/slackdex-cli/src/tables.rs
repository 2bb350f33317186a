//! # Tables Subcommand
//!
//! Markdown comparison table generation. Each section flag selects one
//! table; without flags the full report is emitted. Flag precedence is
//! fixed: when several section flags are set, the first one in the
//! dispatch order below wins, so scripts combining flags keep getting
//! the same section they always did.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use slackdex_report::tables;
use slackdex_schema::Catalog;

/// Arguments for the `slackdex tables` subcommand.
#[derive(Args, Debug, Default)]
pub struct TablesArgs {
    /// Group by category.
    #[arg(long)]
    pub by_category: bool,

    /// Group by programming language.
    #[arg(long)]
    pub by_language: bool,

    /// Group by maintenance status.
    #[arg(long)]
    pub by_maintenance: bool,

    /// Sort by GitHub stars.
    #[arg(long)]
    pub by_stars: bool,

    /// Feature matrix only.
    #[arg(long)]
    pub features: bool,

    /// Read capabilities matrix.
    #[arg(long)]
    pub read_capabilities: bool,

    /// Query options matrix.
    #[arg(long)]
    pub query_options: bool,

    /// Communication features matrix.
    #[arg(long)]
    pub communication_features: bool,

    /// Attachment handling matrix.
    #[arg(long)]
    pub attachment_handling: bool,

    /// Export capabilities matrix.
    #[arg(long)]
    pub export_capabilities: bool,

    /// MCP integration matrix.
    #[arg(long)]
    pub mcp_integration: bool,

    /// Authentication matrix only.
    #[arg(long)]
    pub auth: bool,

    /// AI friendliness matrix.
    #[arg(long)]
    pub ai_friendly: bool,

    /// Output formats matrix.
    #[arg(long)]
    pub output_formats: bool,

    /// Installation methods matrix.
    #[arg(long)]
    pub installation: bool,

    /// Statistics only.
    #[arg(long)]
    pub stats: bool,

    /// Output the loaded descriptors as JSON instead of markdown.
    #[arg(long)]
    pub json: bool,

    /// Timestamp for the report header (default: now, or `SOURCE_DATE_EPOCH`).
    #[arg(long, value_name = "TIMESTAMP")]
    pub generated_at: Option<String>,

    /// Directory containing the YAML project descriptors.
    #[arg(long, default_value = crate::DEFAULT_PROJECTS_DIR)]
    pub projects_dir: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the tables subcommand.
///
/// Returns exit code 0 on success, 1 when the descriptor directory is
/// missing or holds no loadable descriptors.
pub fn run_tables(args: &TablesArgs, repo_root: &Path) -> Result<u8> {
    let projects_dir = crate::resolve_path(&args.projects_dir, repo_root);
    if !projects_dir.is_dir() {
        eprintln!("Error: Projects directory not found: {}", projects_dir.display());
        return Ok(1);
    }

    let catalog = Catalog::load(&projects_dir).context("failed to load project descriptors")?;
    crate::log_catalog_skips(&catalog);

    if catalog.is_empty() {
        eprintln!("Error: No projects found");
        return Ok(1);
    }

    tracing::info!(projects = catalog.len(), "loaded descriptor catalog");

    let output = if args.json {
        serde_json::to_string_pretty(&catalog.raw_json())
            .context("failed to serialize descriptors to JSON")?
    } else {
        let projects = catalog.into_descriptors();
        if args.by_category {
            tables::by_category_tables(&projects)
        } else if args.by_language {
            tables::by_language_tables(&projects)
        } else if args.by_maintenance {
            tables::by_maintenance_tables(&projects)
        } else if args.by_stars {
            tables::overview_table(&projects)
        } else if args.features {
            tables::feature_matrix(&projects)
        } else if args.read_capabilities {
            tables::read_capabilities_table(&projects)
        } else if args.query_options {
            tables::query_options_table(&projects)
        } else if args.communication_features {
            tables::communication_features_table(&projects)
        } else if args.attachment_handling {
            tables::attachment_handling_table(&projects)
        } else if args.export_capabilities {
            tables::export_capabilities_table(&projects)
        } else if args.mcp_integration {
            tables::mcp_integration_table(&projects)
        } else if args.auth {
            tables::auth_matrix(&projects)
        } else if args.ai_friendly {
            tables::ai_friendly_table(&projects)
        } else if args.output_formats {
            tables::output_formats_table(&projects)
        } else if args.installation {
            tables::installation_table(&projects)
        } else if args.stats {
            tables::statistics(&projects)
        } else {
            let generated_at = crate::resolve_generated_at(args.generated_at.as_deref());
            tables::full_report(&projects, &generated_at)
        }
    };

    crate::write_output(args.output.as_deref(), &output)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = "\
name: slackline
repo-url: https://github.com/acme/slackline
description: Send messages from the shell
language: Rust
category: messaging-cli
last-update: '2026-06-01'
stars: 420
";

    fn projects_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let projects = dir.path().join("projects");
        std::fs::create_dir_all(&projects).unwrap();
        for (name, content) in files {
            std::fs::write(projects.join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn missing_projects_dir_fails() {
        // An empty root has no projects/ directory.
        let dir = tempfile::tempdir().unwrap();
        let args = TablesArgs {
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            ..TablesArgs::default()
        };
        assert_eq!(run_tables(&args, dir.path()).unwrap(), 1);
    }

    #[test]
    fn empty_projects_dir_fails() {
        let dir = projects_dir(&[]);
        let args = TablesArgs {
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            ..TablesArgs::default()
        };
        assert_eq!(run_tables(&args, dir.path()).unwrap(), 1);
    }

    #[test]
    fn stats_section_writes_to_file() {
        let dir = projects_dir(&[("acme--slackline.yaml", DESCRIPTOR)]);
        let out = dir.path().join("stats.md");
        let args = TablesArgs {
            stats: true,
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            output: Some(out.clone()),
            ..TablesArgs::default()
        };

        assert_eq!(run_tables(&args, dir.path()).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("## Statistics"));
        assert!(content.contains("- **Total tools tracked:** 1"));
    }

    #[test]
    fn json_mode_exports_raw_descriptors() {
        let dir = projects_dir(&[("acme--slackline.yaml", DESCRIPTOR)]);
        let out = dir.path().join("projects.json");
        let args = TablesArgs {
            json: true,
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            output: Some(out.clone()),
            ..TablesArgs::default()
        };

        assert_eq!(run_tables(&args, dir.path()).unwrap(), 0);
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed[0]["name"], "slackline");
        assert_eq!(parsed[0]["_filename"], "acme--slackline.yaml");
    }

    #[test]
    fn json_takes_precedence_over_section_flags() {
        let dir = projects_dir(&[("acme--slackline.yaml", DESCRIPTOR)]);
        let out = dir.path().join("out.txt");
        let args = TablesArgs {
            json: true,
            stats: true,
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            output: Some(out.clone()),
            ..TablesArgs::default()
        };

        assert_eq!(run_tables(&args, dir.path()).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.trim_start().starts_with('['));
    }

    #[test]
    fn full_report_uses_injected_timestamp() {
        let dir = projects_dir(&[("acme--slackline.yaml", DESCRIPTOR)]);
        let out = dir.path().join("report.md");
        let args = TablesArgs {
            generated_at: Some("2026-08-01 12:00:00".to_string()),
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            output: Some(out.clone()),
            ..TablesArgs::default()
        };

        assert_eq!(run_tables(&args, dir.path()).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("# Slack CLI Tools Comparison\n\n*Generated: 2026-08-01 12:00:00*"));
    }

    #[test]
    fn unreadable_descriptors_are_skipped_not_fatal() {
        let dir = projects_dir(&[
            ("acme--slackline.yaml", DESCRIPTOR),
            ("broken.yaml", "key: [unclosed"),
            ("empty.yaml", ""),
        ]);
        let out = dir.path().join("stats.md");
        let args = TablesArgs {
            stats: true,
            projects_dir: PathBuf::from(crate::DEFAULT_PROJECTS_DIR),
            output: Some(out.clone()),
            ..TablesArgs::default()
        };

        assert_eq!(run_tables(&args, dir.path()).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("- **Total tools tracked:** 1"));
    }
}
