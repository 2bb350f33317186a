//! # Descriptor Taxonomies — Single Source of Truth
//!
//! The closed vocabularies a project descriptor may use: implementation
//! language, tool category, maintenance tier, and commit frequency. Each
//! enum is the single definition used by every crate in the workspace;
//! the `all()` slices are in canonical declaration order, which doubles
//! as the display order for grouped reports.
//!
//! Descriptor files carry these as plain strings and may contain values
//! outside the vocabulary; membership checking is `slackdex-schema`'s
//! job. These enums exist so the accepted sets are written down exactly
//! once.

use serde::{Deserialize, Serialize};

/// Implementation language of a tracked tool.
///
/// Wire strings are the conventional capitalized names (`"C++"`,
/// `"TypeScript"`), not a mechanical case mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Go.
    Go,
    /// Python.
    Python,
    /// TypeScript.
    TypeScript,
    /// JavaScript.
    JavaScript,
    /// Rust.
    Rust,
    /// Bash and other POSIX shell dialects.
    Bash,
    /// PHP.
    #[serde(rename = "PHP")]
    Php,
    /// Java.
    Java,
    /// C.
    C,
    /// Ruby.
    Ruby,
    /// C++.
    #[serde(rename = "C++")]
    Cpp,
    /// Anything not covered above.
    Other,
}

impl Language {
    /// Return all accepted languages in canonical order.
    pub fn all() -> &'static [Language] {
        &[
            Self::Go,
            Self::Python,
            Self::TypeScript,
            Self::JavaScript,
            Self::Rust,
            Self::Bash,
            Self::Php,
            Self::Java,
            Self::C,
            Self::Ruby,
            Self::Cpp,
            Self::Other,
        ]
    }

    /// The wire string for this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Python => "Python",
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
            Self::Rust => "Rust",
            Self::Bash => "Bash",
            Self::Php => "PHP",
            Self::Java => "Java",
            Self::C => "C",
            Self::Ruby => "Ruby",
            Self::Cpp => "C++",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primary category of a tracked tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Slack's own command-line tooling.
    OfficialCli,
    /// General-purpose messaging from the command line.
    MessagingCli,
    /// Full-screen terminal clients.
    TerminalUi,
    /// Tools focused on uploading files.
    FileUpload,
    /// One-shot notification senders.
    NotificationTool,
    /// libpurple / Pidgin protocol plugins.
    LibpurplePlugin,
    /// Bot and automation frameworks.
    BotFramework,
    /// Thin wrappers over the Web API.
    ApiWrapper,
    /// Workspace and channel history exporters.
    ExportTool,
    /// Model Context Protocol servers.
    McpServer,
}

impl Category {
    /// Return all accepted categories in canonical order.
    pub fn all() -> &'static [Category] {
        &[
            Self::OfficialCli,
            Self::MessagingCli,
            Self::TerminalUi,
            Self::FileUpload,
            Self::NotificationTool,
            Self::LibpurplePlugin,
            Self::BotFramework,
            Self::ApiWrapper,
            Self::ExportTool,
            Self::McpServer,
        ]
    }

    /// The kebab-case wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfficialCli => "official-cli",
            Self::MessagingCli => "messaging-cli",
            Self::TerminalUi => "terminal-ui",
            Self::FileUpload => "file-upload",
            Self::NotificationTool => "notification-tool",
            Self::LibpurplePlugin => "libpurple-plugin",
            Self::BotFramework => "bot-framework",
            Self::ApiWrapper => "api-wrapper",
            Self::ExportTool => "export-tool",
            Self::McpServer => "mcp-server",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maintenance tier of a tracked tool.
///
/// Declaration order is most-active first; grouped report sections render
/// in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceTier {
    /// Actively developed with regular feature work.
    ActiveDevelopment,
    /// Maintained for fixes, little new development.
    MaintenanceMode,
    /// Kept alive by community forks or drive-by patches.
    CommunitySustained,
    /// No maintainer response for an extended period.
    Unmaintained,
    /// Explicitly archived upstream.
    Archived,
}

impl MaintenanceTier {
    /// Return all tiers, most-active first.
    pub fn all() -> &'static [MaintenanceTier] {
        &[
            Self::ActiveDevelopment,
            Self::MaintenanceMode,
            Self::CommunitySustained,
            Self::Unmaintained,
            Self::Archived,
        ]
    }

    /// The kebab-case wire string for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveDevelopment => "active-development",
            Self::MaintenanceMode => "maintenance-mode",
            Self::CommunitySustained => "community-sustained",
            Self::Unmaintained => "unmaintained",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for MaintenanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observed commit cadence of a tracked tool's repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitFrequency {
    /// Multiple commits per week.
    VeryActive,
    /// Commits most weeks.
    Active,
    /// Commits most months.
    Moderate,
    /// A few commits per year.
    Sporadic,
    /// No commits for over a year.
    Stale,
    /// No commits for several years.
    Abandoned,
}

impl CommitFrequency {
    /// Return all frequencies, most-active first.
    pub fn all() -> &'static [CommitFrequency] {
        &[
            Self::VeryActive,
            Self::Active,
            Self::Moderate,
            Self::Sporadic,
            Self::Stale,
            Self::Abandoned,
        ]
    }

    /// The kebab-case wire string for this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryActive => "very-active",
            Self::Active => "active",
            Self::Moderate => "moderate",
            Self::Sporadic => "sporadic",
            Self::Stale => "stale",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for CommitFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_wire_strings() {
        assert_eq!(Language::Cpp.as_str(), "C++");
        assert_eq!(Language::Php.as_str(), "PHP");
        assert_eq!(Language::TypeScript.as_str(), "TypeScript");
        let json = serde_json::to_string(&Language::Cpp).unwrap();
        assert_eq!(json, "\"C++\"");
        let back: Language = serde_json::from_str("\"PHP\"").unwrap();
        assert_eq!(back, Language::Php);
    }

    #[test]
    fn language_all_round_trips_through_display() {
        for lang in Language::all() {
            let s = lang.to_string();
            let parsed: Language = serde_json::from_str(&format!("\"{s}\"")).unwrap();
            assert_eq!(parsed, *lang);
        }
    }

    #[test]
    fn category_kebab_case() {
        assert_eq!(Category::OfficialCli.as_str(), "official-cli");
        assert_eq!(Category::McpServer.as_str(), "mcp-server");
        let back: Category = serde_json::from_str("\"libpurple-plugin\"").unwrap();
        assert_eq!(back, Category::LibpurplePlugin);
    }

    #[test]
    fn tier_order_is_most_active_first() {
        let tiers: Vec<&str> = MaintenanceTier::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(
            tiers,
            vec![
                "active-development",
                "maintenance-mode",
                "community-sustained",
                "unmaintained",
                "archived",
            ]
        );
    }

    #[test]
    fn frequency_rejects_unknown() {
        assert!(serde_json::from_str::<CommitFrequency>("\"weekly\"").is_err());
        let back: CommitFrequency = serde_json::from_str("\"very-active\"").unwrap();
        assert_eq!(back, CommitFrequency::VeryActive);
    }
}
