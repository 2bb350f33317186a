//! # Descriptor Rule Validation
//!
//! Checks project descriptor documents against the slackdex field rules:
//! required fields, date/URL/commit formats, taxonomy membership, scalar
//! and container types, the `{owner}--{repo}.yaml` filename convention,
//! and cross-field consistency.
//!
//! ## Severity Contract
//!
//! Every finding is a [`Diagnostic`] graded [`Severity::Error`] or
//! [`Severity::Warning`]. The grades are part of the CI contract:
//! errors always fail a run, warnings fail only under `--strict`.
//! Structural problems (missing required field, bad `repo-url`, wrong
//! field types, unparseable YAML) are errors; advisory findings
//! (commit-hash shape, maintenance metadata vocabulary, filename
//! convention, cross-field hints) are warnings.
//!
//! A rule violation is data in a [`FileReport`], never an `Err`.
//! [`SchemaError`] is reserved for environmental failures such as a
//! missing descriptor directory.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use slackdex_core::{
    Category, CommitFrequency, CommitHash, DescriptorDate, Language, MaintenanceTier, RepoUrl,
    ValidationError,
};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Fields every descriptor must carry. Absence is an error; a present
/// field with a null or empty value is not "missing".
pub const REQUIRED_FIELDS: &[&str] = &[
    "last-update",
    "repo-url",
    "name",
    "description",
    "language",
    "category",
];

/// Fields holding `YYYY-MM-DD` dates.
pub const DATE_FIELDS: &[&str] = &["last-update", "last-commit", "created", "last-release"];

/// Fields that must be integers when present and non-null.
pub const INTEGER_FIELDS: &[&str] = &[
    "stars",
    "forks",
    "watchers",
    "contributors",
    "open-issues",
    "closed-issues",
    "total-releases",
];

/// Fields that must be booleans when present and non-null.
pub const BOOLEAN_FIELDS: &[&str] = &["reputable-source", "archived"];

/// Fields that must be arrays when present and non-null.
pub const ARRAY_FIELDS: &[&str] = &[
    "features",
    "notes",
    "warnings",
    "languages",
    "secondary-categories",
];

/// Fields that must be mappings when present and non-null.
pub const OBJECT_FIELDS: &[&str] = &[
    "slack-features",
    "authentication",
    "output-formats",
    "terminal-features",
    "installation",
    "documentation",
    "ai-friendly",
];

// ---------------------------------------------------------------------------
// Error and diagnostic types
// ---------------------------------------------------------------------------

/// Environmental failures during validation or catalog loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The descriptor directory does not exist.
    #[error("projects directory not found: {path}")]
    DirNotFound {
        /// The directory that was expected to exist.
        path: String,
    },

    /// I/O error while scanning a directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity grade of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Always fails a validation run.
    Error,
    /// Fails only under `--strict`.
    Warning,
}

/// One finding against one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Whether this finding fails the run.
    pub severity: Severity,
    /// Human-readable description, stable across releases; CI greps these.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// All findings for a single descriptor file, in rule order.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File name (not the full path) the findings refer to.
    pub file_name: String,
    /// Findings in the order the rules ran.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Create an empty report for a file.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            diagnostics: Vec::new(),
        }
    }

    fn push_error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn push_warning(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    /// The error-grade findings.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    /// The warning-grade findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Number of error-grade findings.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-grade findings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True when the file has no error-grade findings. Warnings do not
    /// make a file invalid.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}

/// Aggregated result of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Number of files examined.
    pub files_checked: usize,
    /// Files with zero errors (warnings allowed).
    pub valid_files: usize,
    /// Total error findings across all files.
    pub errors: usize,
    /// Total warning findings across all files.
    pub warnings: usize,
}

impl ValidationSummary {
    /// Aggregate per-file reports into run totals.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        Self {
            files_checked: reports.len(),
            valid_files: reports.iter().filter(|r| r.is_valid()).count(),
            errors: reports.iter().map(FileReport::error_count).sum(),
            warnings: reports.iter().map(FileReport::warning_count).sum(),
        }
    }

    /// The run verdict: errors always fail; warnings fail under strict.
    pub fn passed(&self, strict: bool) -> bool {
        self.errors == 0 && !(strict && self.warnings > 0)
    }
}

// ---------------------------------------------------------------------------
// Document validation
// ---------------------------------------------------------------------------

/// Validate one descriptor document against every rule.
///
/// `file_name` is the bare file name; it feeds the filename-convention
/// check and labels the report. The document is the JSON projection of
/// the YAML file (see [`yaml_to_json_value`]).
pub fn validate_value(file_name: &str, doc: &Value) -> FileReport {
    let mut report = FileReport::new(file_name);

    if doc.is_null() {
        report.push_error("Empty YAML file");
        return report;
    }
    let Some(map) = doc.as_object() else {
        report.push_error("Descriptor must be a YAML mapping");
        return report;
    };

    for field in REQUIRED_FIELDS {
        if !map.contains_key(*field) {
            report.push_error(format!("Missing required field: '{field}'"));
        }
    }

    for field in DATE_FIELDS {
        if let Some(value) = present_and_truthy(map, field) {
            let text = value_text(value);
            match DescriptorDate::parse(&text) {
                Ok(_) => {}
                Err(ValidationError::DateValue(_)) => {
                    report.push_error(format!("Invalid date value for '{field}': {text}"));
                }
                Err(_) => {
                    report.push_error(format!(
                        "Invalid date format for '{field}': {text} (expected YYYY-MM-DD)"
                    ));
                }
            }
        }
    }

    if let Some(value) = present_and_truthy(map, "repo-url") {
        if let Some(message) = url_problem("repo-url", value) {
            report.push_error(message);
        }
    }

    if let Some(doc_section) = map.get("documentation").and_then(Value::as_object) {
        if let Some(value) = present_and_truthy(doc_section, "website") {
            if let Some(message) = url_problem("documentation.website", value) {
                report.push_warning(message);
            }
        }
    }

    if let Some(value) = present_and_truthy(map, "repo-commit") {
        let text = value_text(value);
        if CommitHash::new(text.clone()).is_err() {
            report.push_warning(format!("Invalid commit hash for 'repo-commit': {text}"));
        }
    }

    let languages: Vec<&str> = Language::all().iter().map(Language::as_str).collect();
    let categories: Vec<&str> = Category::all().iter().map(Category::as_str).collect();
    let tiers: Vec<&str> = MaintenanceTier::all().iter().map(MaintenanceTier::as_str).collect();
    let frequencies: Vec<&str> =
        CommitFrequency::all().iter().map(CommitFrequency::as_str).collect();

    if let Some(value) = present_and_truthy(map, "language") {
        if let Some(message) = enum_problem("language", value, &languages) {
            report.push_error(message);
        }
    }
    if let Some(value) = present_and_truthy(map, "category") {
        if let Some(message) = enum_problem("category", value, &categories) {
            report.push_error(message);
        }
    }
    if let Some(value) = present_and_truthy(map, "maintenance-tier") {
        if let Some(message) = enum_problem("maintenance-tier", value, &tiers) {
            report.push_warning(message);
        }
    }
    if let Some(value) = present_and_truthy(map, "commit-frequency") {
        if let Some(message) = enum_problem("commit-frequency", value, &frequencies) {
            report.push_warning(message);
        }
    }

    for field in INTEGER_FIELDS {
        if let Some(value) = present_non_null(map, field) {
            let is_integer = matches!(value, Value::Number(n) if n.is_i64() || n.is_u64());
            if !is_integer {
                report.push_error(format!(
                    "Field '{field}' must be an integer, got {}",
                    json_type_name(value)
                ));
            }
        }
    }

    for field in BOOLEAN_FIELDS {
        if let Some(value) = present_non_null(map, field) {
            if !value.is_boolean() {
                report.push_error(format!(
                    "Field '{field}' must be a boolean, got {}",
                    json_type_name(value)
                ));
            }
        }
    }

    for field in ARRAY_FIELDS {
        if let Some(value) = present_non_null(map, field) {
            if !value.is_array() {
                report.push_error(format!(
                    "Field '{field}' must be an array, got {}",
                    json_type_name(value)
                ));
            }
        }
    }

    for field in OBJECT_FIELDS {
        if let Some(value) = present_non_null(map, field) {
            if !value.is_object() {
                report.push_error(format!(
                    "Field '{field}' must be an object, got {}",
                    json_type_name(value)
                ));
            }
        }
    }

    if !filename_matches_convention(file_name) {
        report.push_warning("Filename should follow pattern: {owner}--{repo}.yaml");
    }

    let archived = map.get("archived").map(is_truthy).unwrap_or(false);
    let tier_is_archived = map.get("maintenance-tier").and_then(Value::as_str) == Some("archived");
    if archived && !tier_is_archived {
        report.push_warning("If 'archived' is true, 'maintenance-tier' should be 'archived'");
    }

    let reputable = map.get("reputable-source").map(is_truthy).unwrap_or(false);
    let has_organization = map.get("organization").map(is_truthy).unwrap_or(false);
    if reputable && !has_organization {
        report.push_warning("If 'reputable-source' is true, 'organization' should be specified");
    }

    report
}

/// Validate one descriptor file on disk.
///
/// Read and parse failures become error diagnostics in the report, so a
/// broken file counts against the run like any other invalid file.
pub fn validate_file(path: &Path) -> FileReport {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let mut report = FileReport::new(file_name);
            report.push_error(format!("File read error: {e}"));
            return report;
        }
    };

    let yaml: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(yaml) => yaml,
        Err(e) => {
            let mut report = FileReport::new(file_name);
            report.push_error(format!("YAML parsing error: {e}"));
            return report;
        }
    };

    validate_value(&file_name, &yaml_to_json_value(yaml))
}

/// Validate every `*.yaml` file directly under `projects_dir`, in file
/// name order.
///
/// # Errors
///
/// Returns [`SchemaError::DirNotFound`] when the directory is missing
/// and [`SchemaError::Io`] when it cannot be scanned. Per-file problems
/// never surface here; they are diagnostics in the returned reports.
pub fn validate_dir(projects_dir: &Path) -> Result<Vec<FileReport>, SchemaError> {
    let files = find_descriptor_files(projects_dir)?;
    Ok(files.iter().map(|path| validate_file(path)).collect())
}

/// List the `*.yaml` files directly under a descriptor directory,
/// sorted by file name. The scan is deliberately non-recursive.
pub fn find_descriptor_files(projects_dir: &Path) -> Result<Vec<PathBuf>, SchemaError> {
    if !projects_dir.is_dir() {
        return Err(SchemaError::DirNotFound {
            path: projects_dir.display().to_string(),
        });
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(projects_dir)? {
        let path = entry?.path();
        let is_yaml = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".yaml"));
        if is_yaml {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// YAML to JSON projection
// ---------------------------------------------------------------------------

/// Convert a `serde_yaml::Value` into a `serde_json::Value`.
///
/// The conversion is total: YAML tags unwrap to their inner value,
/// non-string mapping keys are coerced to strings, and non-finite
/// floats collapse to null. Floats stay floats, so integer rules can
/// reject them with the right type name.
pub fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(serde_json::Number::from(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(serde_json::Number::from(u))
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => format!("{other:?}"),
                };
                obj.insert(key, yaml_to_json_value(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

// ---------------------------------------------------------------------------
// Check helpers
// ---------------------------------------------------------------------------

fn present_and_truthy<'a>(
    map: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    map.get(field).filter(|v| is_truthy(v))
}

fn present_non_null<'a>(
    map: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

/// Python-style truthiness: null, false, empty strings/containers, and
/// zero are all falsy. Format checks skip falsy values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a value the way it should appear inside a diagnostic: strings
/// bare, everything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn url_problem(field: &str, value: &Value) -> Option<String> {
    let text = value_text(value);
    match RepoUrl::new(text.clone()) {
        Ok(_) => None,
        Err(_) => Some(format!(
            "Invalid URL for '{field}': {text} (must start with http:// or https://)"
        )),
    }
}

fn enum_problem(field: &str, value: &Value, valid: &[&str]) -> Option<String> {
    let member = value.as_str().map(|s| valid.contains(&s)).unwrap_or(false);
    if member {
        None
    } else {
        Some(format!(
            "Invalid value for '{field}': {} (valid: {})",
            value_text(value),
            valid.join(", ")
        ))
    }
}

/// `{owner}--{repo}.yaml` where both sides are non-empty and the whole
/// stem uses `[A-Za-z0-9_-]` only.
fn filename_matches_convention(file_name: &str) -> bool {
    let Some(stem) = file_name.strip_suffix(".yaml") else {
        return false;
    };
    if stem.is_empty()
        || !stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return false;
    }
    match stem.find("--") {
        Some(i) => i >= 1 && stem.len() > i + 2,
        None => false,
    }
}
