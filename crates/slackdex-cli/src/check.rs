//! # Check Subcommand
//!
//! Descriptor validation with the banner and summary layout the CI
//! gate greps. Errors always fail the run; warnings fail only under
//! `--strict`. With `-v`, clean files are listed too.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use slackdex_schema::{find_descriptor_files, validate_file, FileReport, ValidationSummary};

/// Arguments for the `slackdex check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail on warnings too.
    #[arg(long)]
    pub strict: bool,

    /// Directory containing the YAML project descriptors.
    #[arg(long, default_value = crate::DEFAULT_PROJECTS_DIR)]
    pub projects_dir: PathBuf,

    /// Specific YAML files to validate (default: all in the projects directory).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Execute the check subcommand.
///
/// Returns exit code 0 when validation passes, 1 otherwise.
pub fn run_check(args: &CheckArgs, repo_root: &Path, verbose: u8) -> Result<u8> {
    let projects_dir = crate::resolve_path(&args.projects_dir, repo_root);
    if !projects_dir.is_dir() {
        println!("Error: Projects directory not found: {}", projects_dir.display());
        return Ok(1);
    }

    let files = if args.files.is_empty() {
        find_descriptor_files(&projects_dir)?
    } else {
        let mut found = Vec::new();
        for file in &args.files {
            let resolved = crate::resolve_path(file, repo_root);
            if !resolved.exists() {
                println!("Error: File not found: {}", file.display());
                continue;
            }
            found.push(resolved);
        }
        found
    };

    println!("\n{}", "=".repeat(60));
    println!("SLACK CLI TOOLS YAML VALIDATION");
    println!("{}", "=".repeat(60));

    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
    for path in &files {
        let report = validate_file(path);
        print_report(&report, verbose > 0);
        reports.push(report);
    }

    let summary = ValidationSummary::from_reports(&reports);
    println!("\n{}", "-".repeat(60));
    println!("Files checked: {}", summary.files_checked);
    println!("Valid files:   {}", summary.valid_files);
    println!("Errors:        {}", summary.errors);
    println!("Warnings:      {}", summary.warnings);
    println!("{}", "-".repeat(60));

    if summary.errors > 0 {
        println!("\nValidation FAILED");
        Ok(1)
    } else if args.strict && summary.warnings > 0 {
        println!("\nValidation FAILED (strict mode)");
        Ok(1)
    } else {
        println!("\nValidation PASSED");
        Ok(0)
    }
}

/// Print one file's findings. Clean files are shown only in verbose mode.
fn print_report(report: &FileReport, verbose: bool) {
    if report.diagnostics.is_empty() {
        if verbose {
            println!("  {}", report.file_name);
        }
        return;
    }

    println!("\n{}:", report.file_name);
    for diagnostic in report.errors() {
        println!("  {diagnostic}");
    }
    for diagnostic in report.warnings() {
        println!("  {diagnostic}");
    }
}
