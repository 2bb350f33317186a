//! # slackdex-cli — Command-Line Interface for slackdex
//!
//! Provides the `slackdex` binary, replacing the repository's collection
//! of standalone Python maintenance scripts with a single structured CLI.
//!
//! ## Subcommands
//!
//! - `slackdex check` — Validate project descriptors, with `--strict`.
//! - `slackdex tables` — Markdown comparison tables and raw JSON export.
//! - `slackdex api` — Inspect the archived Slack OpenAPI method catalog.
//! - `slackdex coverage` — Cross-reference declared API coverage against
//!   the OpenAPI spec.
//!
//! ## Backward Compatibility
//!
//! The output layouts match the Python scripts line for line. CI
//! pipelines grep the validation banner and the table headings, so
//! every section title, separator, and exit code is preserved:
//!
//! ```bash
//! slackdex check --strict
//! slackdex tables --features -o docs/features.md
//! slackdex api --summary
//! slackdex coverage --all -o docs/api-coverage.md
//! ```

pub mod api;
pub mod check;
pub mod coverage;
pub mod tables;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use slackdex_schema::{Catalog, SkipReason};

/// Default location of the archived Slack OpenAPI spec, relative to the
/// repository root.
pub const DEFAULT_SPEC_PATH: &str = "archived-sources/slack-api/slack-web-openapi-v2.json";

/// Default location of the project descriptor directory, relative to the
/// repository root.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Write a report to the given file, or to stdout when no path is set.
///
/// File writes are confirmed on stderr so stdout stays clean for piping.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write output to {}", path.display()))?;
            eprintln!("Output written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Log files the catalog loader skipped. Empty documents are routine
/// (placeholder files); everything else deserves a warning.
pub fn log_catalog_skips(catalog: &Catalog) {
    for skipped in &catalog.skipped {
        match &skipped.reason {
            SkipReason::EmptyDocument => {
                tracing::debug!(file = %skipped.file_name, "skipped empty descriptor");
            }
            reason => {
                tracing::warn!(file = %skipped.file_name, %reason, "failed to load descriptor");
            }
        }
    }
}

/// Timestamp stamped into generated reports.
///
/// An explicit value wins. Otherwise `SOURCE_DATE_EPOCH` is honored so
/// CI can regenerate reports byte-identically, falling back to the
/// current local time.
pub fn resolve_generated_at(explicit: Option<&str>) -> String {
    if let Some(value) = explicit {
        return value.to_string();
    }
    if let Ok(epoch) = std::env::var("SOURCE_DATE_EPOCH") {
        if let Ok(secs) = epoch.parse::<i64>() {
            if let Some(moment) = chrono::DateTime::from_timestamp(secs, 0) {
                return moment.format("%Y-%m-%d %H:%M:%S").to_string();
            }
        }
    }
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_keeps_absolute_paths() {
        let root = Path::new("/repo");
        let absolute = Path::new("/etc/hosts");
        assert_eq!(resolve_path(absolute, root), absolute);
    }

    #[test]
    fn resolve_path_prefers_repo_root_when_target_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("projects")).unwrap();

        let resolved = resolve_path(Path::new("projects"), dir.path());
        assert_eq!(resolved, dir.path().join("projects"));
    }

    #[test]
    fn resolve_path_falls_back_to_cwd_relative() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_path(Path::new("no-such-dir"), dir.path());
        assert_eq!(resolved, PathBuf::from("no-such-dir"));
    }

    #[test]
    fn write_output_writes_file_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_output(Some(&path), "# Report").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }

    #[test]
    fn resolve_generated_at_prefers_explicit_value() {
        assert_eq!(
            resolve_generated_at(Some("2026-01-02 03:04:05")),
            "2026-01-02 03:04:05"
        );
    }

    #[test]
    fn resolve_generated_at_produces_datetime_shape() {
        let stamp = resolve_generated_at(None);
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
    }
}
