//! # API coverage report
//!
//! Cross-references the `api-coverage` section of each descriptor against the
//! method catalog parsed from the Slack OpenAPI spec, and renders the coverage
//! comparison sections: summary, per-tool table, per-category matrix, and the
//! per-tool gap listings.
//!
//! A tool "claims" a method by listing it under `methods-supported` or
//! `methods-partial`. Claims are taken at face value in per-tool figures, so a
//! claimed name absent from the spec still counts toward that tool's totals;
//! only the corpus-wide "covered by at least one tool" figure is restricted to
//! methods that actually exist in the spec.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use slackdex_core::Descriptor;
use slackdex_openapi::ApiCatalog;

use crate::markdown::{link, truncate_chars};
use crate::tables::rank_by_stars;

// ---------------------------------------------------------------------------
// Section selection
// ---------------------------------------------------------------------------

/// Which coverage sections to include in [`coverage_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageSections {
    /// Corpus-wide summary bullets.
    pub summary: bool,
    /// One row per tool with overall coverage and top categories.
    pub by_tool: bool,
    /// Category-by-tool coverage matrix.
    pub by_category: bool,
    /// Per-tool listings of uncovered methods.
    pub gaps: bool,
}

impl CoverageSections {
    /// Every section enabled.
    pub fn all() -> Self {
        Self { summary: true, by_tool: true, by_category: true, gaps: true }
    }

    /// True when at least one section is enabled.
    pub fn any(&self) -> bool {
        self.summary || self.by_tool || self.by_category || self.gaps
    }
}

impl Default for CoverageSections {
    fn default() -> Self {
        Self::all()
    }
}

// ---------------------------------------------------------------------------
// Claim helpers
// ---------------------------------------------------------------------------

/// Splits descriptors into those with a non-empty `api-coverage` section
/// (active) and the rest (excluded). Both halves keep catalog order.
fn split_active(projects: &[Descriptor]) -> (Vec<&Descriptor>, Vec<&Descriptor>) {
    projects
        .iter()
        .partition(|p| p.api_coverage.as_ref().is_some_and(|c| !c.is_empty()))
}

/// Every method name a tool claims, supported and partial alike.
fn claimed_methods(project: &Descriptor) -> BTreeSet<&str> {
    let mut claimed = BTreeSet::new();
    if let Some(coverage) = project.api_coverage.as_ref() {
        claimed.extend(coverage.methods_supported.iter().map(String::as_str));
        claimed.extend(coverage.methods_partial.iter().map(String::as_str));
    }
    claimed
}

/// Spec method names grouped by category.
fn category_sets(catalog: &ApiCatalog) -> BTreeMap<&str, BTreeSet<&str>> {
    catalog
        .methods
        .iter()
        .map(|(category, methods)| {
            (category.as_str(), methods.keys().map(String::as_str).collect())
        })
        .collect()
}

/// Every method name in the spec, across all categories.
fn all_method_names(catalog: &ApiCatalog) -> BTreeSet<&str> {
    catalog
        .methods
        .values()
        .flat_map(|methods| methods.keys().map(String::as_str))
        .collect()
}

/// Coverage ratio as a percentage, 0.0 when the denominator is zero.
fn percent(covered: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    }
}

/// Cell text for the category matrix: `covered/total (pct%)`, or `-` for an
/// empty category.
fn format_coverage(covered: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{covered}/{total} ({:.0}%)", percent(covered, total).round())
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Corpus-wide summary bullets.
pub fn summary(projects: &[Descriptor], catalog: &ApiCatalog) -> String {
    let (active, excluded) = split_active(projects);
    let all_names = all_method_names(catalog);
    let total_methods = catalog.total_methods();

    // Union of claims, restricted to methods that exist in the spec so the
    // "not covered" count cannot go negative on a typo'd claim.
    let mut covered: BTreeSet<&str> = BTreeSet::new();
    for project in &active {
        for method in claimed_methods(project) {
            if all_names.contains(method) {
                covered.insert(method);
            }
        }
    }

    let lines = vec![
        "## Slack API Coverage Summary".to_string(),
        String::new(),
        format!("- **Total API Methods**: {total_methods}"),
        format!("- **Total Categories**: {}", catalog.total_categories()),
        format!("- **Tools with Coverage Data**: {}", active.len()),
        format!("- **Tools without Coverage Data**: {}", excluded.len()),
        format!(
            "- **Methods Covered by At Least One Tool**: {} ({:.1}%)",
            covered.len(),
            percent(covered.len(), total_methods)
        ),
        format!(
            "- **Methods Not Covered by Any Tool**: {}",
            total_methods - covered.len()
        ),
    ];
    lines.join("\n")
}

/// One row per tool: stars, overall coverage, and the three categories where
/// it covers the most methods. Rows are ordered by coverage percentage
/// descending, with catalog order breaking ties.
pub fn by_tool_table(projects: &[Descriptor], catalog: &ApiCatalog) -> String {
    let (active, _) = split_active(projects);

    let mut lines = vec!["## API Coverage by Tool".to_string(), String::new()];
    if active.is_empty() {
        lines.push("No tools have API coverage data.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    lines.push("| Tool | Stars | Methods Covered | Coverage % | Top Categories |".to_string());
    lines.push("|------|-------|-----------------|------------|----------------|".to_string());

    let categories = category_sets(catalog);
    let total_methods = catalog.total_methods();

    struct Row<'a> {
        project: &'a Descriptor,
        covered: usize,
        pct_tenths: i64,
        top_categories: String,
    }

    let mut rows: Vec<Row> = Vec::new();
    for project in &active {
        let claimed = claimed_methods(project);
        let mut per_category: Vec<(&str, usize)> = categories
            .iter()
            .map(|(category, methods)| (*category, methods.intersection(&claimed).count()))
            .filter(|(_, covered)| *covered > 0)
            .collect();
        per_category.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let top_categories = per_category
            .iter()
            .take(3)
            .map(|(category, covered)| format!("{category}({covered})"))
            .collect::<Vec<_>>()
            .join(", ");

        // Tenths of a percent so the sort key matches the displayed figure.
        let pct_tenths = (percent(claimed.len(), total_methods) * 10.0).round() as i64;
        rows.push(Row { project, covered: claimed.len(), pct_tenths, top_categories });
    }
    rows.sort_by_key(|row| Reverse(row.pct_tenths));

    for row in rows {
        lines.push(format!(
            "| {} | {} | {}/{} | {:.1}% | {} |",
            link(row.project.display_name(), row.project.link_url()),
            row.project.stars_or_zero(),
            row.covered,
            total_methods,
            row.pct_tenths as f64 / 10.0,
            row.top_categories,
        ));
    }

    lines.join("\n")
}

/// Category-by-tool matrix: one column per active tool (stars descending),
/// one row per category that at least one tool touches (method count
/// descending), plus a TOTAL row and trailing listings for uncovered
/// categories and excluded tools.
pub fn by_category_table(projects: &[Descriptor], catalog: &ApiCatalog) -> String {
    let (active, excluded) = split_active(projects);
    if active.is_empty() {
        return "No tools have API coverage data.\n".to_string();
    }

    let categories = category_sets(catalog);
    let ranked = rank_by_stars(active.iter().copied());
    let claims: Vec<BTreeSet<&str>> = ranked.iter().map(|p| claimed_methods(p)).collect();

    let mut covered_categories: BTreeSet<&str> = BTreeSet::new();
    for claimed in &claims {
        for (category, methods) in &categories {
            if methods.intersection(claimed).next().is_some() {
                covered_categories.insert(category);
            }
        }
    }
    if covered_categories.is_empty() {
        return "No API methods are covered by any tool.\n".to_string();
    }

    let mut lines = vec![
        "## API Coverage by Category".to_string(),
        String::new(),
        "Coverage shown as: `covered/total (percentage)`".to_string(),
        String::new(),
    ];

    let mut header = String::from("| Category |");
    for project in &ranked {
        header.push_str(&format!(" {} |", project.display_name()));
    }
    lines.push(header);
    lines.push(format!("|{}", "---|".repeat(ranked.len() + 1)));

    let mut row_categories: Vec<&str> = covered_categories.iter().copied().collect();
    row_categories.sort_by(|a, b| categories[b].len().cmp(&categories[a].len()).then(a.cmp(b)));

    for category in row_categories {
        let methods = &categories[category];
        let mut row = format!("| **{category}** ({}) |", methods.len());
        for claimed in &claims {
            let covered = methods.intersection(claimed).count();
            row.push_str(&format!(" {} |", format_coverage(covered, methods.len())));
        }
        lines.push(row);
    }

    lines.push(format!(
        "|{}|{}|",
        "-".repeat(20),
        vec!["-".repeat(15); ranked.len()].join("|")
    ));

    let total_methods = catalog.total_methods();
    let mut total_row = String::from("| **TOTAL** |");
    for claimed in &claims {
        total_row.push_str(&format!(" {} |", format_coverage(claimed.len(), total_methods)));
    }
    lines.push(total_row);

    let mut uncovered: Vec<&str> = categories
        .keys()
        .copied()
        .filter(|category| !covered_categories.contains(category))
        .collect();
    if !uncovered.is_empty() {
        uncovered.sort_by(|a, b| categories[b].len().cmp(&categories[a].len()).then(a.cmp(b)));
        lines.push(String::new());
        lines.push("### Categories Without Tool Coverage".to_string());
        lines.push(String::new());
        lines.push("The following API categories have no coverage from any tool:".to_string());
        lines.push(String::new());
        for category in uncovered {
            lines.push(format!("- **{category}** ({} methods)", categories[category].len()));
        }
    }

    if !excluded.is_empty() {
        lines.push(String::new());
        lines.push("### Tools Without API Coverage Data".to_string());
        lines.push(String::new());
        lines.push("The following tools have no `api-coverage` section:".to_string());
        lines.push(String::new());
        for project in &excluded {
            let reason = project.first_warning().unwrap_or("No API coverage data");
            lines.push(format!(
                "- **{}**: {}...",
                project.display_name(),
                truncate_chars(reason, 60)
            ));
        }
    }

    lines.join("\n")
}

/// Per-tool gap listings: which spec methods each tool does not claim,
/// grouped by category inside a collapsed `<details>` block.
pub fn gaps_table(projects: &[Descriptor], catalog: &ApiCatalog) -> String {
    let (active, _) = split_active(projects);
    if active.is_empty() {
        return "No tools have API coverage data.\n".to_string();
    }

    let all_names = all_method_names(catalog);
    let mut lines = vec!["## API Coverage Gaps by Tool".to_string(), String::new()];

    for project in rank_by_stars(active.iter().copied()) {
        let claimed = claimed_methods(project);
        let gaps: Vec<&str> = all_names
            .iter()
            .copied()
            .filter(|method| !claimed.contains(method))
            .collect();

        lines.push(String::new());
        lines.push(format!("### {}", project.display_name()));
        lines.push(format!(
            "Covered: {}/{} ({:.1}%)",
            claimed.len(),
            all_names.len(),
            percent(claimed.len(), all_names.len())
        ));
        lines.push(String::new());

        if gaps.is_empty() {
            continue;
        }

        let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for method in gaps {
            let category = match method.split_once('.') {
                Some((category, _)) => category,
                None => "other",
            };
            by_category.entry(category).or_default().push(method);
        }

        lines.push("<details>".to_string());
        let missing: usize = by_category.values().map(Vec::len).sum();
        lines.push(format!("<summary>Missing {missing} methods</summary>"));
        lines.push(String::new());
        for (category, methods) in &by_category {
            let shown = methods.iter().take(10).copied().collect::<Vec<_>>().join(", ");
            lines.push(format!("**{category}** ({}): {}", methods.len(), shown));
            if methods.len() > 10 {
                lines.push(format!("  ... and {} more", methods.len() - 10));
            }
        }
        lines.push("</details>".to_string());
    }

    lines.join("\n")
}

/// Full coverage report: title, attribution line, then the selected sections
/// in a fixed order.
pub fn coverage_report(
    projects: &[Descriptor],
    catalog: &ApiCatalog,
    sections: CoverageSections,
) -> String {
    let mut parts = vec![
        "# Slack API Coverage Comparison".to_string(),
        String::new(),
        "*Auto-generated from project YAML files and official Slack OpenAPI spec*".to_string(),
        String::new(),
    ];
    if sections.summary {
        parts.push(summary(projects, catalog));
        parts.push(String::new());
    }
    if sections.by_tool {
        parts.push(by_tool_table(projects, catalog));
        parts.push(String::new());
    }
    if sections.by_category {
        parts.push(by_category_table(projects, catalog));
        parts.push(String::new());
    }
    if sections.gaps {
        parts.push(gaps_table(projects, catalog));
        parts.push(String::new());
    }
    parts.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_catalog() -> ApiCatalog {
        let mut paths = serde_json::Map::new();
        for name in [
            "chat.postMessage",
            "chat.delete",
            "chat.update",
            "conversations.list",
            "conversations.history",
        ] {
            paths.insert(format!("/{name}"), json!({"get": {}}));
        }
        for i in 1..=12 {
            paths.insert(format!("/admin.m{i:02}"), json!({"get": {}}));
        }
        let spec = json!({
            "info": {"title": "Slack Web API", "version": "2.0.0"},
            "paths": paths,
        });
        ApiCatalog::from_spec(&spec, "spec.json").unwrap()
    }

    fn fixture_projects() -> Vec<Descriptor> {
        let docs = [
            json!({
                "name": "alpha",
                "repo-url": "https://github.com/acme/alpha",
                "stars": 5000,
                "api-coverage": {
                    "methods-supported": [
                        "chat.postMessage",
                        "chat.delete",
                        "conversations.list"
                    ],
                    "methods-partial": [{"method": "chat.update"}]
                }
            }),
            json!({
                "name": "beta",
                "repo-url": "https://github.com/acme/beta",
                "stars": 100,
                "api-coverage": {
                    "methods-supported": ["chat.postMessage", "ghost.method"]
                }
            }),
            json!({
                "name": "gamma",
                "repo-url": "https://github.com/acme/gamma",
                "warnings": ["Abandoned since 2019, use alternatives instead please really"]
            }),
            json!({
                "name": "delta",
                "repo-url": "https://github.com/acme/delta"
            }),
        ];
        docs.iter().map(Descriptor::from_value).collect()
    }

    // -- Summary --

    #[test]
    fn summary_counts_tools_and_methods() {
        let rendered = summary(&fixture_projects(), &fixture_catalog());
        assert!(rendered.starts_with("## Slack API Coverage Summary\n\n"));
        assert!(rendered.contains("- **Total API Methods**: 17"));
        assert!(rendered.contains("- **Total Categories**: 3"));
        assert!(rendered.contains("- **Tools with Coverage Data**: 2"));
        assert!(rendered.contains("- **Tools without Coverage Data**: 2"));
    }

    #[test]
    fn summary_ignores_claims_missing_from_spec() {
        let rendered = summary(&fixture_projects(), &fixture_catalog());
        // beta's ghost.method does not exist in the spec, so the union is the
        // four real methods alpha and beta claim between them.
        assert!(rendered.contains("- **Methods Covered by At Least One Tool**: 4 (23.5%)"));
        assert!(rendered.contains("- **Methods Not Covered by Any Tool**: 13"));
    }

    // -- By tool --

    #[test]
    fn by_tool_sorts_by_coverage_and_lists_top_categories() {
        let rendered = by_tool_table(&fixture_projects(), &fixture_catalog());
        let alpha = rendered.find("| [alpha]").unwrap();
        let beta = rendered.find("| [beta]").unwrap();
        assert!(alpha < beta);
        assert!(rendered.contains(
            "| [alpha](https://github.com/acme/alpha) | 5000 | 4/17 | 23.5% | chat(3), conversations(1) |"
        ));
        assert!(rendered
            .contains("| [beta](https://github.com/acme/beta) | 100 | 2/17 | 11.8% | chat(1) |"));
    }

    #[test]
    fn by_tool_handles_empty_catalog_of_tools() {
        let rendered = by_tool_table(&[], &fixture_catalog());
        assert_eq!(
            rendered,
            "## API Coverage by Tool\n\nNo tools have API coverage data.\n"
        );
    }

    // -- By category --

    #[test]
    fn by_category_matrix_rows_and_total() {
        let rendered = by_category_table(&fixture_projects(), &fixture_catalog());
        assert!(rendered.contains("## API Coverage by Category"));
        assert!(rendered.contains("Coverage shown as: `covered/total (percentage)`"));
        // Columns follow stars descending.
        assert!(rendered.contains("| Category | alpha | beta |"));
        assert!(rendered.contains("|---|---|---|"));
        // Rows follow category size descending, skipping untouched admin.
        let chat = rendered.find("| **chat** (3) |").unwrap();
        let conversations = rendered.find("| **conversations** (2) |").unwrap();
        assert!(chat < conversations);
        assert!(rendered.contains("| **chat** (3) | 3/3 (100%) | 1/3 (33%) |"));
        assert!(rendered.contains("| **conversations** (2) | 1/2 (50%) | 0/2 (0%) |"));
        assert!(!rendered.contains("| **admin**"));
        // The TOTAL row keeps claimed counts even for unknown methods.
        assert!(rendered.contains("| **TOTAL** | 4/17 (24%) | 2/17 (12%) |"));
        let divider = format!("|{}|{}|{}|", "-".repeat(20), "-".repeat(15), "-".repeat(15));
        assert!(rendered.contains(&divider));
    }

    #[test]
    fn by_category_lists_uncovered_categories_and_excluded_tools() {
        let rendered = by_category_table(&fixture_projects(), &fixture_catalog());
        assert!(rendered.contains("### Categories Without Tool Coverage"));
        assert!(rendered.contains("- **admin** (12 methods)"));
        assert!(rendered.contains("### Tools Without API Coverage Data"));
        assert!(rendered
            .contains("- **gamma**: Abandoned since 2019, use alternatives instead please really..."));
        assert!(rendered.contains("- **delta**: No API coverage data..."));
    }

    #[test]
    fn by_category_without_active_tools() {
        let doc = json!({"name": "solo", "repo-url": "https://github.com/acme/solo"});
        let projects = vec![Descriptor::from_value(&doc)];
        assert_eq!(
            by_category_table(&projects, &fixture_catalog()),
            "No tools have API coverage data.\n"
        );
    }

    #[test]
    fn by_category_when_no_claim_matches_any_method() {
        let doc = json!({
            "name": "solo",
            "repo-url": "https://github.com/acme/solo",
            "api-coverage": {"methods-supported": ["ghost.only"]}
        });
        let projects = vec![Descriptor::from_value(&doc)];
        assert_eq!(
            by_category_table(&projects, &fixture_catalog()),
            "No API methods are covered by any tool.\n"
        );
    }

    // -- Gaps --

    #[test]
    fn gaps_lists_missing_methods_per_category() {
        let rendered = gaps_table(&fixture_projects(), &fixture_catalog());
        let alpha = rendered.find("### alpha").unwrap();
        let beta = rendered.find("### beta").unwrap();
        assert!(alpha < beta);
        assert!(rendered.contains("### alpha\nCovered: 4/17 (23.5%)"));
        assert!(rendered.contains("<summary>Missing 13 methods</summary>"));
        // Fully covered chat has no gap entry for alpha.
        let alpha_block = &rendered[alpha..beta];
        assert!(!alpha_block.contains("**chat**"));
        assert!(alpha_block.contains("**conversations** (1): conversations.history"));
        assert!(alpha_block.contains(
            "**admin** (12): admin.m01, admin.m02, admin.m03, admin.m04, admin.m05, \
             admin.m06, admin.m07, admin.m08, admin.m09, admin.m10"
        ));
        assert!(alpha_block.contains("  ... and 2 more"));
        // beta's bogus claim still counts toward its own covered figure.
        assert!(rendered.contains("### beta\nCovered: 2/17 (11.8%)"));
        assert!(rendered.contains("<summary>Missing 16 methods</summary>"));
    }

    // -- Full report --

    #[test]
    fn coverage_report_orders_sections() {
        let rendered =
            coverage_report(&fixture_projects(), &fixture_catalog(), CoverageSections::all());
        assert!(rendered.starts_with(
            "# Slack API Coverage Comparison\n\n\
             *Auto-generated from project YAML files and official Slack OpenAPI spec*\n\n"
        ));
        let order = [
            "## Slack API Coverage Summary",
            "## API Coverage by Tool",
            "## API Coverage by Category",
            "## API Coverage Gaps by Tool",
        ];
        let mut last = 0;
        for heading in order {
            let at = rendered.find(heading).unwrap();
            assert!(at >= last, "{heading} out of order");
            last = at;
        }
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn coverage_report_respects_section_selection() {
        let sections = CoverageSections {
            summary: true,
            by_tool: false,
            by_category: false,
            gaps: false,
        };
        let rendered = coverage_report(&fixture_projects(), &fixture_catalog(), sections);
        assert!(rendered.contains("## Slack API Coverage Summary"));
        assert!(!rendered.contains("## API Coverage by Tool"));
        assert!(!rendered.contains("## API Coverage by Category"));
        assert!(!rendered.contains("## API Coverage Gaps by Tool"));
    }
}
