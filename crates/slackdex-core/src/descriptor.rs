//! # Project Descriptor Record
//!
//! The lenient typed view of one project YAML file, plus the tri-state
//! support markers used by comparison matrices.
//!
//! ## Leniency Contract
//!
//! [`Descriptor::from_value`] is total. A field with the wrong type (a
//! string `stars`, a scalar `features`) becomes `None` exactly as a
//! missing field does, and unknown keys are ignored. Reports therefore
//! always render every loaded file, falling back to placeholders
//! (`Unknown`, `#`, `N/A`). Schema validation reports wrong types as
//! diagnostics from `slackdex-schema`; this type never does.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One value inside a capability section such as `slack-features` or
/// `installation`.
///
/// Capability sections are free-form maps. Bools are the common case,
/// installation sections carry command strings, and a few keys hold
/// nested lists (`auth-notes`, `mcp-tools`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A plain boolean flag.
    Bool(bool),
    /// A string value, e.g. an install command.
    Text(String),
    /// Anything else: lists, nested maps, numbers, null.
    Other(Value),
}

impl FlagValue {
    /// Build a flag value from a raw JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Other(other.clone()),
        }
    }

    /// The string elements of a list-valued flag; empty for anything else.
    pub fn as_str_list(&self) -> Vec<&str> {
        match self {
            Self::Other(Value::Array(items)) => {
                items.iter().filter_map(|v| v.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A capability section: key to flag value, deterministically ordered.
pub type FlagMap = BTreeMap<String, FlagValue>;

/// Tri-state support marker for matrix cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Support {
    /// The capability is present (`true`).
    Supported,
    /// The capability is explicitly absent (`false`).
    Unsupported,
    /// The descriptor does not say (missing key, null, or any other value).
    Unknown,
}

impl Support {
    /// Interpret a flag value: only `true` and `false` are informative.
    pub fn from_flag(flag: Option<&FlagValue>) -> Self {
        match flag {
            Some(FlagValue::Bool(true)) => Self::Supported,
            Some(FlagValue::Bool(false)) => Self::Unsupported,
            _ => Self::Unknown,
        }
    }

    /// Interpret an installation entry, where a non-empty string such as
    /// `"brew install foo"` also counts as supported.
    pub fn from_install(flag: Option<&FlagValue>) -> Self {
        match flag {
            Some(FlagValue::Bool(true)) => Self::Supported,
            Some(FlagValue::Text(s)) if !s.is_empty() => Self::Supported,
            Some(FlagValue::Bool(false)) => Self::Unsupported,
            _ => Self::Unknown,
        }
    }

    /// The markdown cell marker: `✓`, `✗`, or `-`.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Supported => "✓",
            Self::Unsupported => "✗",
            Self::Unknown => "-",
        }
    }
}

/// Declared Slack Web API coverage of a tool.
///
/// `methods-partial` entries in the wild are either bare method names or
/// maps with a `method` key plus commentary; both collapse to the method
/// name here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCoverage {
    /// Methods the tool fully supports.
    pub methods_supported: Vec<String>,
    /// Methods the tool partially supports.
    pub methods_partial: Vec<String>,
}

impl ApiCoverage {
    /// Extract coverage lists from the raw `api-coverage` value.
    pub fn from_value(value: &Value) -> Self {
        let methods_supported = string_items(value.get("methods-supported"));
        let methods_partial = value
            .get("methods-partial")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(partial_method_name).collect())
            .unwrap_or_default();
        Self { methods_supported, methods_partial }
    }

    /// True when neither list has entries.
    pub fn is_empty(&self) -> bool {
        self.methods_supported.is_empty() && self.methods_partial.is_empty()
    }
}

fn partial_method_name(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Lenient typed view of one project descriptor file.
///
/// Every field is optional; see the module docs for the leniency
/// contract. Field names mirror the kebab-case YAML keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    /// Tool name (`name`).
    pub name: Option<String>,
    /// One-line description (`description`).
    pub description: Option<String>,
    /// Owning organization (`organization`).
    pub organization: Option<String>,
    /// Upstream repository URL (`repo-url`), kept raw so invalid values
    /// still render verbatim.
    pub repo_url: Option<String>,
    /// Pinned upstream commit (`repo-commit`), raw.
    pub repo_commit: Option<String>,
    /// Primary implementation language (`language`), raw.
    pub language: Option<String>,
    /// Additional languages (`languages`).
    pub languages: Option<Vec<String>>,
    /// Primary category (`category`), raw kebab-case.
    pub category: Option<String>,
    /// Additional categories (`secondary-categories`).
    pub secondary_categories: Option<Vec<String>>,
    /// Maintenance tier (`maintenance-tier`), raw kebab-case.
    pub maintenance_tier: Option<String>,
    /// Commit cadence (`commit-frequency`), raw kebab-case.
    pub commit_frequency: Option<String>,
    /// GitHub star count (`stars`).
    pub stars: Option<u64>,
    /// Fork count (`forks`).
    pub forks: Option<u64>,
    /// Watcher count (`watchers`).
    pub watchers: Option<u64>,
    /// Contributor count (`contributors`).
    pub contributors: Option<u64>,
    /// Open issue count (`open-issues`).
    pub open_issues: Option<u64>,
    /// Closed issue count (`closed-issues`).
    pub closed_issues: Option<u64>,
    /// Release count (`total-releases`).
    pub total_releases: Option<u64>,
    /// Last descriptor review date (`last-update`), raw `YYYY-MM-DD`.
    pub last_update: Option<String>,
    /// Last upstream commit date (`last-commit`), raw.
    pub last_commit: Option<String>,
    /// Repository creation date (`created`), raw.
    pub created: Option<String>,
    /// Last release date (`last-release`), raw.
    pub last_release: Option<String>,
    /// Upstream archive flag (`archived`).
    pub archived: Option<bool>,
    /// Vetted-source flag (`reputable-source`).
    pub reputable_source: Option<bool>,
    /// Headline feature list (`features`).
    pub features: Option<Vec<String>>,
    /// Free-form notes (`notes`).
    pub notes: Option<Vec<String>>,
    /// Caveats and health warnings (`warnings`).
    pub warnings: Option<Vec<String>>,
    /// Documentation links (`documentation`), including `website`.
    pub documentation: Option<FlagMap>,
    /// Core Slack capabilities (`slack-features`).
    pub slack_features: Option<FlagMap>,
    /// Supported auth methods (`authentication`), including `auth-notes`.
    pub authentication: Option<FlagMap>,
    /// Automation readiness (`ai-friendly`).
    pub ai_friendly: Option<FlagMap>,
    /// Output formats (`output-formats`).
    pub output_formats: Option<FlagMap>,
    /// Install channels (`installation`); values may be command strings.
    pub installation: Option<FlagMap>,
    /// Terminal UI capabilities (`terminal-features`).
    pub terminal_features: Option<FlagMap>,
    /// Read-side capabilities (`read-capabilities`).
    pub read_capabilities: Option<FlagMap>,
    /// History query options (`query-options`).
    pub query_options: Option<FlagMap>,
    /// Messaging capabilities (`communication-features`).
    pub communication_features: Option<FlagMap>,
    /// File handling capabilities (`attachment-handling`).
    pub attachment_handling: Option<FlagMap>,
    /// Export capabilities (`export-capabilities`).
    pub export_capabilities: Option<FlagMap>,
    /// MCP server details (`mcp-integration`).
    pub mcp_integration: Option<FlagMap>,
    /// Declared Web API coverage (`api-coverage`).
    pub api_coverage: Option<ApiCoverage>,
}

impl Descriptor {
    /// Project the lenient view out of a raw JSON document.
    ///
    /// Never fails; a non-object input yields an all-`None` descriptor.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: str_field(value, "name"),
            description: str_field(value, "description"),
            organization: str_field(value, "organization"),
            repo_url: str_field(value, "repo-url"),
            repo_commit: str_field(value, "repo-commit"),
            language: str_field(value, "language"),
            languages: str_list_field(value, "languages"),
            category: str_field(value, "category"),
            secondary_categories: str_list_field(value, "secondary-categories"),
            maintenance_tier: str_field(value, "maintenance-tier"),
            commit_frequency: str_field(value, "commit-frequency"),
            stars: u64_field(value, "stars"),
            forks: u64_field(value, "forks"),
            watchers: u64_field(value, "watchers"),
            contributors: u64_field(value, "contributors"),
            open_issues: u64_field(value, "open-issues"),
            closed_issues: u64_field(value, "closed-issues"),
            total_releases: u64_field(value, "total-releases"),
            last_update: str_field(value, "last-update"),
            last_commit: str_field(value, "last-commit"),
            created: str_field(value, "created"),
            last_release: str_field(value, "last-release"),
            archived: bool_field(value, "archived"),
            reputable_source: bool_field(value, "reputable-source"),
            features: str_list_field(value, "features"),
            notes: str_list_field(value, "notes"),
            warnings: str_list_field(value, "warnings"),
            documentation: map_field(value, "documentation"),
            slack_features: map_field(value, "slack-features"),
            authentication: map_field(value, "authentication"),
            ai_friendly: map_field(value, "ai-friendly"),
            output_formats: map_field(value, "output-formats"),
            installation: map_field(value, "installation"),
            terminal_features: map_field(value, "terminal-features"),
            read_capabilities: map_field(value, "read-capabilities"),
            query_options: map_field(value, "query-options"),
            communication_features: map_field(value, "communication-features"),
            attachment_handling: map_field(value, "attachment-handling"),
            export_capabilities: map_field(value, "export-capabilities"),
            mcp_integration: map_field(value, "mcp-integration"),
            api_coverage: value.get("api-coverage").map(ApiCoverage::from_value),
        }
    }

    /// Tool name, or `Unknown`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Repository URL for markdown links, or `#`.
    pub fn link_url(&self) -> &str {
        self.repo_url.as_deref().unwrap_or("#")
    }

    /// Language cell text, or `N/A`.
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("N/A")
    }

    /// Raw category for cell text, or `N/A`.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("N/A")
    }

    /// Raw maintenance tier for cell text, or `N/A`.
    pub fn maintenance_label(&self) -> &str {
        self.maintenance_tier.as_deref().unwrap_or("N/A")
    }

    /// Last-commit cell text, or `N/A`.
    pub fn last_commit_label(&self) -> &str {
        self.last_commit.as_deref().unwrap_or("N/A")
    }

    /// Grouping key for category sections; missing groups under `other`.
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or("other")
    }

    /// Grouping key for language sections; missing groups under `Other`.
    pub fn language_key(&self) -> &str {
        self.language.as_deref().unwrap_or("Other")
    }

    /// Grouping key for maintenance statistics; missing counts as `unknown`.
    pub fn maintenance_key(&self) -> &str {
        self.maintenance_tier.as_deref().unwrap_or("unknown")
    }

    /// Star count for sorting and totals; missing sorts as zero.
    pub fn stars_or_zero(&self) -> u64 {
        self.stars.unwrap_or(0)
    }

    /// The `auth-notes` list from the authentication section.
    pub fn auth_notes(&self) -> Vec<&str> {
        section_str_list(self.authentication.as_ref(), "auth-notes")
    }

    /// True when the MCP section flags `is-mcp-server: true`.
    pub fn is_mcp_server(&self) -> bool {
        matches!(
            self.mcp_integration.as_ref().and_then(|m| m.get("is-mcp-server")),
            Some(FlagValue::Bool(true))
        )
    }

    /// The `mcp-tools` list from the MCP section.
    pub fn mcp_tools(&self) -> Vec<&str> {
        section_str_list(self.mcp_integration.as_ref(), "mcp-tools")
    }

    /// The `mcp-resources` list from the MCP section.
    pub fn mcp_resources(&self) -> Vec<&str> {
        section_str_list(self.mcp_integration.as_ref(), "mcp-resources")
    }

    /// The `notes` list from the MCP section.
    pub fn mcp_notes(&self) -> Vec<&str> {
        section_str_list(self.mcp_integration.as_ref(), "notes")
    }

    /// First entry of `warnings`, used when explaining exclusions.
    pub fn first_warning(&self) -> Option<&str> {
        self.warnings.as_ref().and_then(|w| w.first()).map(String::as_str)
    }
}

fn section_str_list<'a>(section: Option<&'a FlagMap>, key: &str) -> Vec<&'a str> {
    section
        .and_then(|m| m.get(key))
        .map(FlagValue::as_str_list)
        .unwrap_or_default()
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u64_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}

fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

fn str_list_field(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
        .unwrap_or_default()
}

fn map_field(value: &Value, key: &str) -> Option<FlagMap> {
    value.get(key).and_then(Value::as_object).map(|obj| {
        obj.iter().map(|(k, v)| (k.clone(), FlagValue::from_value(v))).collect()
    })
}
