//! # Comparison Table Generators
//!
//! The markdown sections of the tools comparison: the star-ranked
//! overview, the grouped views (category, language, maintenance), the
//! capability matrices, and the summary statistics.
//!
//! All generators share one layout discipline. Rows rank by stars
//! descending with catalog order breaking ties, grouped sections list
//! alphabetically, count rankings order by count descending then name,
//! and matrix cells are the tri-state `✓` / `✗` / `-` markers from
//! [`Support`].

use std::collections::BTreeMap;

use slackdex_core::{Descriptor, FlagMap, FlagValue, MaintenanceTier, Support};

use crate::markdown::{
    format_thousands, link, title_case_kebab, truncate_chars, truncate_with_ellipsis,
};

// ---------------------------------------------------------------------------
// Matrix column sets
// ---------------------------------------------------------------------------

const FEATURE_COLUMNS: &[&str] = &[
    "send-messages",
    "receive-messages",
    "file-upload",
    "thread-support",
    "channel-browse",
    "multi-workspace",
    "search",
    "app-development",
];

const AUTH_COLUMNS: &[&str] = &[
    "oauth2",
    "legacy-token",
    "browser-token",
    "api-key",
    "env-var-auth",
];

const AI_COLUMNS: &[&str] = &[
    "designed-for-ai",
    "structured-output",
    "scriptable",
    "stateless",
    "ci-cd-friendly",
];

const OUTPUT_FORMAT_COLUMNS: &[&str] =
    &["json", "jsonl", "yaml", "table", "plain-text", "pipe-friendly"];

const INSTALL_COLUMNS: &[&str] = &[
    "homebrew",
    "pip",
    "npm",
    "snap",
    "go-install",
    "binary",
    "aur",
    "source-compile",
];

const READ_COLUMNS: &[&str] = &[
    "read-messages",
    "read-channels",
    "read-dms",
    "read-group-dms",
    "read-threads",
    "message-search",
    "user-info",
    "export-history",
];

const QUERY_COLUMNS: &[&str] = &[
    "date-range-filter",
    "limit-results",
    "pagination",
    "channel-filter",
    "user-filter",
    "keyword-search",
    "thread-filter",
];

const COMMUNICATION_COLUMNS: &[&str] = &[
    "reply-to-thread",
    "reply-with-broadcast",
    "start-new-thread",
    "send-to-dm",
    "send-to-channel",
    "send-to-group-dm",
    "message-formatting",
];

const ATTACHMENT_COLUMNS: &[&str] = &[
    "upload-files",
    "download-files",
    "upload-from-stdin",
    "upload-images",
    "upload-audio",
    "upload-video",
];

const EXPORT_COLUMNS: &[&str] = &[
    "full-workspace-export",
    "channel-export",
    "dm-export",
    "thread-export",
    "include-attachments",
];

const MCP_COLUMNS: &[&str] = &[
    "is-mcp-server",
    "stealth-mode",
    "rate-limit-handling",
    "supports-enterprise",
];

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Stars descending; the stable sort keeps catalog order for ties.
pub(crate) fn rank_by_stars<'a>(
    projects: impl IntoIterator<Item = &'a Descriptor>,
) -> Vec<&'a Descriptor> {
    let mut ranked: Vec<&'a Descriptor> = projects.into_iter().collect();
    ranked.sort_by_key(|p| std::cmp::Reverse(p.stars_or_zero()));
    ranked
}

fn stars_label(project: &Descriptor) -> String {
    match project.stars {
        Some(stars) => format_thousands(stars),
        None => "N/A".to_string(),
    }
}

fn tool_cell(project: &Descriptor) -> String {
    link(project.display_name(), project.link_url())
}

/// Occurrence counts ranked by count descending, then name.
fn ranked_counts<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
}

/// Render one capability matrix: a `| Tool |` header from `columns`,
/// then a star-ranked row of support markers per project.
fn matrix_lines(
    projects: &[Descriptor],
    heading: &str,
    columns: &[&str],
    section: fn(&Descriptor) -> Option<&FlagMap>,
    label: fn(&str) -> String,
    support: fn(Option<&FlagValue>) -> Support,
) -> Vec<String> {
    let mut lines = vec![heading.to_string(), String::new()];

    let mut header = String::from("| Tool |");
    for column in columns {
        header.push_str(&format!(" {} |", label(column)));
    }
    lines.push(header);
    lines.push(format!("|------|{}", "------|".repeat(columns.len())));

    for p in rank_by_stars(projects) {
        let map = section(p);
        let mut row = format!("| {} |", tool_cell(p));
        for column in columns {
            let flag = map.and_then(|m| m.get(*column));
            row.push_str(&format!(" {} |", support(flag).marker()));
        }
        lines.push(row);
    }

    lines
}

fn output_format_label(column: &str) -> String {
    match column {
        "json" | "jsonl" | "yaml" => column.to_uppercase(),
        other => title_case_kebab(other),
    }
}

// ---------------------------------------------------------------------------
// Overview and grouped tables
// ---------------------------------------------------------------------------

/// The star-ranked overview of every tool.
pub fn overview_table(projects: &[Descriptor]) -> String {
    let mut lines = vec![
        "## Overview".to_string(),
        String::new(),
        "| Tool | Language | Stars | Category | Maintenance | Description |".to_string(),
        "|------|----------|-------|----------|-------------|-------------|".to_string(),
    ];

    for p in rank_by_stars(projects) {
        let description = truncate_with_ellipsis(p.description.as_deref().unwrap_or(""), 60);
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            tool_cell(p),
            p.language_label(),
            stars_label(p),
            title_case_kebab(p.category_label()),
            title_case_kebab(p.maintenance_label()),
            description,
        ));
    }

    lines.join("\n")
}

/// Per-category sections, alphabetical, each star-ranked inside.
pub fn by_category_tables(projects: &[Descriptor]) -> String {
    let mut groups: BTreeMap<&str, Vec<&Descriptor>> = BTreeMap::new();
    for p in projects {
        groups.entry(p.category_key()).or_default().push(p);
    }

    let mut lines = vec!["## By Category".to_string(), String::new()];
    for (category, members) in &groups {
        lines.push(format!("### {}", title_case_kebab(category)));
        lines.push(String::new());
        lines.push("| Tool | Stars | Maintenance | Description |".to_string());
        lines.push("|------|-------|-------------|-------------|".to_string());
        for p in rank_by_stars(members.iter().copied()) {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                tool_cell(p),
                stars_label(p),
                title_case_kebab(p.maintenance_label()),
                truncate_chars(p.description.as_deref().unwrap_or(""), 80),
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Per-language sections, alphabetical, each star-ranked inside.
pub fn by_language_tables(projects: &[Descriptor]) -> String {
    let mut groups: BTreeMap<&str, Vec<&Descriptor>> = BTreeMap::new();
    for p in projects {
        groups.entry(p.language_key()).or_default().push(p);
    }

    let mut lines = vec!["## By Programming Language".to_string(), String::new()];
    for (language, members) in &groups {
        lines.push(format!("### {language}"));
        lines.push(String::new());
        lines.push("| Tool | Stars | Category | Maintenance |".to_string());
        lines.push("|------|-------|----------|-------------|".to_string());
        for p in rank_by_stars(members.iter().copied()) {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                tool_cell(p),
                stars_label(p),
                title_case_kebab(p.category_label()),
                title_case_kebab(p.maintenance_label()),
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Maintenance sections in tier order, healthiest first. Tools with an
/// unknown tier are left out of this view.
pub fn by_maintenance_tables(projects: &[Descriptor]) -> String {
    let mut groups: BTreeMap<&str, Vec<&Descriptor>> = BTreeMap::new();
    for p in projects {
        groups.entry(p.maintenance_key()).or_default().push(p);
    }

    let mut lines = vec!["## By Maintenance Status".to_string(), String::new()];
    for tier in MaintenanceTier::all() {
        let Some(members) = groups.get(tier.as_str()) else {
            continue;
        };
        lines.push(format!("### {}", title_case_kebab(tier.as_str())));
        lines.push(String::new());
        lines.push("| Tool | Language | Stars | Last Activity |".to_string());
        lines.push("|------|----------|-------|---------------|".to_string());
        for p in rank_by_stars(members.iter().copied()) {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                tool_cell(p),
                p.language_label(),
                stars_label(p),
                p.last_commit_label(),
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Capability matrices
// ---------------------------------------------------------------------------

/// Core Slack capability matrix from `slack-features`.
pub fn feature_matrix(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Feature Matrix",
        FEATURE_COLUMNS,
        |d| d.slack_features.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// Read-side capability matrix from `read-capabilities`.
pub fn read_capabilities_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Read Capabilities",
        READ_COLUMNS,
        |d| d.read_capabilities.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// History query option matrix from `query-options`.
pub fn query_options_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Query Options",
        QUERY_COLUMNS,
        |d| d.query_options.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// Messaging capability matrix from `communication-features`.
pub fn communication_features_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Communication Features",
        COMMUNICATION_COLUMNS,
        |d| d.communication_features.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// File handling matrix from `attachment-handling`.
pub fn attachment_handling_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Attachment Handling",
        ATTACHMENT_COLUMNS,
        |d| d.attachment_handling.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// Export capability matrix from `export-capabilities`.
pub fn export_capabilities_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Export Capabilities",
        EXPORT_COLUMNS,
        |d| d.export_capabilities.as_ref(),
        title_case_kebab,
        Support::from_flag,
    )
    .join("\n")
}

/// MCP matrix from `mcp-integration`, with a per-server listing of the
/// tools and resources each MCP server exposes.
pub fn mcp_integration_table(projects: &[Descriptor]) -> String {
    let mut lines = matrix_lines(
        projects,
        "## MCP Integration",
        MCP_COLUMNS,
        |d| d.mcp_integration.as_ref(),
        title_case_kebab,
        Support::from_flag,
    );

    lines.push(String::new());
    lines.push("### MCP Tools and Resources".to_string());
    lines.push(String::new());
    for p in rank_by_stars(projects) {
        if !p.is_mcp_server() {
            continue;
        }
        lines.push(format!("**{}:**", p.display_name()));

        let tools = p.mcp_tools();
        if !tools.is_empty() {
            lines.push("- Tools:".to_string());
            for tool in tools {
                lines.push(format!("  - {tool}"));
            }
        }

        let resources = p.mcp_resources();
        if !resources.is_empty() {
            lines.push("- Resources:".to_string());
            for resource in resources {
                lines.push(format!("  - {resource}"));
            }
        }

        let notes = p.mcp_notes();
        if !notes.is_empty() {
            lines.push("- Notes:".to_string());
            for note in notes {
                lines.push(format!("  - {note}"));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// Authentication matrix from `authentication`, with a legend and the
/// per-tool `auth-notes` blocks.
pub fn auth_matrix(projects: &[Descriptor]) -> String {
    let mut lines = matrix_lines(
        projects,
        "## Authentication Methods",
        AUTH_COLUMNS,
        |d| d.authentication.as_ref(),
        title_case_kebab,
        Support::from_flag,
    );

    lines.push(String::new());
    lines.push("**Legend:** ✓ = Supported, ✗ = Not Supported, - = Unknown".to_string());
    lines.push(String::new());
    lines.push("### Authentication Notes".to_string());
    lines.push(String::new());
    for p in rank_by_stars(projects) {
        let notes = p.auth_notes();
        if notes.is_empty() {
            continue;
        }
        lines.push(format!("**{}:**", p.display_name()));
        for note in notes {
            lines.push(format!("- {note}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Automation readiness matrix from `ai-friendly`.
pub fn ai_friendly_table(projects: &[Descriptor]) -> String {
    let mut lines = matrix_lines(
        projects,
        "## AI/Automation Friendliness",
        AI_COLUMNS,
        |d| d.ai_friendly.as_ref(),
        title_case_kebab,
        Support::from_flag,
    );

    lines.push(String::new());
    lines.push(
        "**Best for AI/Automation:** Tools with ✓ in 'Designed For Ai' or 'Structured Output'"
            .to_string(),
    );
    lines.push(String::new());

    lines.join("\n")
}

/// Output format matrix from `output-formats`. The acronym formats keep
/// their upper-case spelling in the header.
pub fn output_formats_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Output Formats",
        OUTPUT_FORMAT_COLUMNS,
        |d| d.output_formats.as_ref(),
        output_format_label,
        Support::from_flag,
    )
    .join("\n")
}

/// Install channel matrix from `installation`. Install entries are
/// often command strings, which count as supported.
pub fn installation_table(projects: &[Descriptor]) -> String {
    matrix_lines(
        projects,
        "## Installation Methods",
        INSTALL_COLUMNS,
        |d| d.installation.as_ref(),
        title_case_kebab,
        Support::from_install,
    )
    .join("\n")
}

// ---------------------------------------------------------------------------
// Statistics and the full report
// ---------------------------------------------------------------------------

/// Catalog-wide counts: totals, then category, language, and tier
/// rankings.
pub fn statistics(projects: &[Descriptor]) -> String {
    let total_stars: u64 = projects.iter().map(Descriptor::stars_or_zero).sum();

    let mut lines = vec![
        "## Statistics".to_string(),
        String::new(),
        format!("- **Total tools tracked:** {}", projects.len()),
        format!("- **Combined GitHub stars:** {}", format_thousands(total_stars)),
        String::new(),
        "### By Category".to_string(),
        String::new(),
    ];
    for (category, count) in ranked_counts(projects.iter().map(Descriptor::category_key)) {
        lines.push(format!("- {}: {count}", title_case_kebab(category)));
    }

    lines.push(String::new());
    lines.push("### By Language".to_string());
    lines.push(String::new());
    for (language, count) in ranked_counts(projects.iter().map(Descriptor::language_key)) {
        lines.push(format!("- {language}: {count}"));
    }

    lines.push(String::new());
    lines.push("### By Maintenance Status".to_string());
    lines.push(String::new());
    for (tier, count) in ranked_counts(projects.iter().map(Descriptor::maintenance_key)) {
        lines.push(format!("- {}: {count}", title_case_kebab(tier)));
    }

    lines.join("\n")
}

/// The complete comparison document. `generated_at` is the preformatted
/// timestamp line content, injected so runs can be reproducible.
///
/// The language grouping is deliberately not part of the full report;
/// it is reachable on its own through the CLI.
pub fn full_report(projects: &[Descriptor], generated_at: &str) -> String {
    let sections = [
        statistics(projects),
        overview_table(projects),
        by_category_tables(projects),
        by_maintenance_tables(projects),
        feature_matrix(projects),
        read_capabilities_table(projects),
        query_options_table(projects),
        communication_features_table(projects),
        attachment_handling_table(projects),
        export_capabilities_table(projects),
        mcp_integration_table(projects),
        auth_matrix(projects),
        ai_friendly_table(projects),
        output_formats_table(projects),
        installation_table(projects),
    ];

    let mut out = format!("# Slack CLI Tools Comparison\n\n*Generated: {generated_at}*\n\n");
    out.push_str(&sections.join("\n\n"));
    out
}
