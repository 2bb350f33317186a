//! # OpenAPI Method Catalog
//!
//! Projects the archived Slack OpenAPI v2 document into an
//! [`ApiCatalog`]: category to method name to [`ApiMethod`]. The
//! projection is tolerant of spec noise. Path items that are not
//! objects are skipped, missing `info` falls back to defaults, and
//! unknown parameter shapes degrade to empty fields rather than
//! failing the whole document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// HTTP verbs recognized on a path item, in probe order. Only the
/// first verb present is kept; Slack methods expose one verb each.
const HTTP_VERBS: &[&str] = &["get", "post", "put", "delete", "patch"];

const DESCRIPTION_LIMIT: usize = 200;
const PARAM_DESCRIPTION_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while loading an OpenAPI document.
#[derive(Error, Debug)]
pub enum OpenApiError {
    /// The spec file could not be read.
    #[error("failed to read OpenAPI spec {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The spec file is not valid JSON.
    #[error("failed to parse OpenAPI spec {path}: {reason}")]
    Parse {
        /// Path that was being parsed.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The document root is not a JSON object.
    #[error("OpenAPI document root must be a JSON object")]
    NotAnObject,
}

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// One parameter of an API method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiParameter {
    /// Parameter name.
    pub name: String,
    /// Whether the spec marks the parameter required.
    pub required: bool,
    /// Declared type, `unknown` when the spec omits it.
    #[serde(rename = "type")]
    pub param_type: String,
    /// Description, truncated to keep exports readable.
    pub description: String,
}

/// One Slack Web API method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMethod {
    /// The URL path, e.g. `/chat.postMessage`.
    pub path: String,
    /// Upper-cased HTTP verb.
    pub http_method: String,
    /// Description, truncated to keep exports readable.
    pub description: String,
    /// One-line summary from the spec.
    pub summary: String,
    /// Declared parameters.
    pub parameters: Vec<ApiParameter>,
    /// Number of declared parameters.
    pub parameter_count: usize,
    /// Names of the required parameters.
    pub required_params: Vec<String>,
}

/// Per-category roll-up inside a [`CatalogSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Number of methods in the category.
    pub count: usize,
    /// Method names, sorted.
    pub methods: Vec<String>,
}

/// Catalog-wide totals with per-category detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    /// Total method count.
    pub total_methods: usize,
    /// Total category count.
    pub total_categories: usize,
    /// Per-category counts and names, sorted by category.
    pub categories: BTreeMap<String, CategorySummary>,
}

/// Spec provenance block of a [`SpecExport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecInfo<'a> {
    /// Spec title.
    pub title: &'a str,
    /// Spec version.
    pub version: &'a str,
    /// Where the spec was loaded from.
    pub source: &'a str,
}

/// Serializable view of a whole catalog, for `api --json`.
#[derive(Debug, Serialize)]
pub struct SpecExport<'a> {
    /// Title, version, and source path.
    pub spec_info: SpecInfo<'a>,
    /// Catalog totals.
    pub summary: CatalogSummary,
    /// Full method detail, category to name to method.
    pub methods_by_category: &'a BTreeMap<String, BTreeMap<String, ApiMethod>>,
}

/// The Slack Web API method catalog.
#[derive(Debug, Clone, Default)]
pub struct ApiCatalog {
    /// Spec title, `Slack Web API` when the spec omits it.
    pub title: String,
    /// Spec version, `unknown` when the spec omits it.
    pub version: String,
    /// Path the spec was loaded from.
    pub source: String,
    /// Category to method name to method.
    pub methods: BTreeMap<String, BTreeMap<String, ApiMethod>>,
}

impl ApiCatalog {
    /// Build a catalog from an already-parsed OpenAPI document.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::NotAnObject`] when the document root is
    /// not a JSON object.
    pub fn from_spec(spec: &Value, source: impl Into<String>) -> Result<Self, OpenApiError> {
        let root = spec.as_object().ok_or(OpenApiError::NotAnObject)?;

        let info = root.get("info").and_then(Value::as_object);
        let title = info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("Slack Web API")
            .to_string();
        let version = info
            .and_then(|i| i.get("version"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let mut methods: BTreeMap<String, BTreeMap<String, ApiMethod>> = BTreeMap::new();
        if let Some(paths) = root.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let Some(item) = item.as_object() else {
                    continue;
                };
                let Some(verb) = HTTP_VERBS.iter().find(|v| item.contains_key(**v)) else {
                    continue;
                };
                let Some(details) = item.get(*verb).and_then(Value::as_object) else {
                    continue;
                };

                let (name, category) = split_method_path(path);
                methods
                    .entry(category)
                    .or_default()
                    .insert(name, parse_method(path, verb, details));
            }
        }

        Ok(Self {
            title,
            version,
            source: source.into(),
            methods,
        })
    }

    /// Load and parse an OpenAPI document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::Io`] when the file cannot be read and
    /// [`OpenApiError::Parse`] when it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, OpenApiError> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| OpenApiError::Io {
            path: shown.clone(),
            source,
        })?;
        let spec: Value = serde_json::from_str(&content).map_err(|e| OpenApiError::Parse {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        Self::from_spec(&spec, shown)
    }

    /// Total number of methods across all categories.
    pub fn total_methods(&self) -> usize {
        self.methods.values().map(BTreeMap::len).sum()
    }

    /// Number of categories.
    pub fn total_categories(&self) -> usize {
        self.methods.len()
    }

    /// Category names, sorted.
    pub fn category_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    /// The methods of one category, when it exists.
    pub fn category(&self, name: &str) -> Option<&BTreeMap<String, ApiMethod>> {
        self.methods.get(name)
    }

    /// A catalog narrowed to one category, keeping the spec provenance.
    /// `None` when the category does not exist.
    pub fn filter_category(&self, name: &str) -> Option<ApiCatalog> {
        let methods = self.methods.get(name)?;
        Some(ApiCatalog {
            title: self.title.clone(),
            version: self.version.clone(),
            source: self.source.clone(),
            methods: BTreeMap::from([(name.to_string(), methods.clone())]),
        })
    }

    /// Every method name across all categories, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .methods
            .values()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names
    }

    /// Catalog totals with per-category names.
    pub fn summary(&self) -> CatalogSummary {
        let categories = self
            .methods
            .iter()
            .map(|(category, methods)| {
                (
                    category.clone(),
                    CategorySummary {
                        count: methods.len(),
                        methods: methods.keys().cloned().collect(),
                    },
                )
            })
            .collect();
        CatalogSummary {
            total_methods: self.total_methods(),
            total_categories: self.total_categories(),
            categories,
        }
    }

    /// The serializable view used by `api --json`.
    pub fn export(&self) -> SpecExport<'_> {
        SpecExport {
            spec_info: SpecInfo {
                title: &self.title,
                version: &self.version,
                source: &self.source,
            },
            summary: self.summary(),
            methods_by_category: &self.methods,
        }
    }
}

/// Method name is the path without leading slashes; category is the
/// segment before the first dot, or `other` for dotless paths.
fn split_method_path(path: &str) -> (String, String) {
    let name = path.trim_start_matches('/');
    let category = match name.split_once('.') {
        Some((category, _)) => category,
        None => "other",
    };
    (name.to_string(), category.to_string())
}

fn parse_method(path: &str, verb: &str, details: &serde_json::Map<String, Value>) -> ApiMethod {
    let parameters: Vec<ApiParameter> = details
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(Value::as_object)
                .map(parse_parameter)
                .collect()
        })
        .unwrap_or_default();

    let required_params = parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.clone())
        .collect();

    ApiMethod {
        path: path.to_string(),
        http_method: verb.to_uppercase(),
        description: truncate_chars(str_or_empty(details.get("description")), DESCRIPTION_LIMIT),
        summary: str_or_empty(details.get("summary")).to_string(),
        parameter_count: parameters.len(),
        required_params,
        parameters,
    }
}

fn parse_parameter(param: &serde_json::Map<String, Value>) -> ApiParameter {
    ApiParameter {
        name: str_or_empty(param.get("name")).to_string(),
        required: param
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        param_type: param
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        description: truncate_chars(str_or_empty(param.get("description")), PARAM_DESCRIPTION_LIMIT),
    }
}

fn str_or_empty(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).unwrap_or("")
}

/// Character-based truncation, safe on multi-byte text.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample_spec() -> Value {
        json!({
            "info": {"title": "Slack Web API", "version": "2.0.0"},
            "paths": {
                "/chat.postMessage": {
                    "post": {
                        "description": "Sends a message to a channel.",
                        "summary": "Sends a message to a channel.",
                        "parameters": [
                            {
                                "name": "channel",
                                "required": true,
                                "type": "string",
                                "description": "Channel, private group, or IM channel."
                            },
                            {"name": "thread_ts"}
                        ]
                    }
                },
                "/chat.delete": {
                    "post": {"description": "Deletes a message.", "summary": ""}
                },
                "/users.list": {
                    "get": {"description": "Lists all users in a workspace."}
                },
                "/files.upload": {
                    "get": {"description": "probe order keeps this one"},
                    "post": {"description": "never reached"}
                },
                "/health": {"get": {}},
                "/broken": 42
            }
        })
    }

    #[test]
    fn test_catalog_groups_methods_by_category() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        assert_eq!(catalog.total_methods(), 5);
        assert_eq!(catalog.total_categories(), 4);
        assert_eq!(catalog.category_names(), vec!["chat", "files", "other", "users"]);
        assert!(catalog.category("chat").unwrap().contains_key("chat.postMessage"));
        assert!(catalog.category("chat").unwrap().contains_key("chat.delete"));
    }

    #[test]
    fn test_method_fields() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        let method = &catalog.category("chat").unwrap()["chat.postMessage"];

        assert_eq!(method.path, "/chat.postMessage");
        assert_eq!(method.http_method, "POST");
        assert_eq!(method.summary, "Sends a message to a channel.");
        assert_eq!(method.parameter_count, 2);
        assert_eq!(method.required_params, vec!["channel"]);

        let channel = &method.parameters[0];
        assert_eq!(channel.name, "channel");
        assert!(channel.required);
        assert_eq!(channel.param_type, "string");

        // Absent keys degrade to defaults.
        let thread_ts = &method.parameters[1];
        assert!(!thread_ts.required);
        assert_eq!(thread_ts.param_type, "unknown");
        assert_eq!(thread_ts.description, "");
    }

    #[test]
    fn test_first_verb_in_probe_order_wins() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        let upload = &catalog.category("files").unwrap()["files.upload"];
        assert_eq!(upload.http_method, "GET");
        assert_eq!(upload.description, "probe order keeps this one");
    }

    #[test]
    fn test_dotless_path_lands_in_other() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        assert!(catalog.category("other").unwrap().contains_key("health"));
    }

    #[test]
    fn test_non_object_path_items_are_skipped() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        assert!(catalog.category("broken").is_none());
        assert!(!catalog.method_names().contains(&"broken"));
    }

    #[test]
    fn test_descriptions_truncate_by_characters() {
        let long = "x".repeat(500);
        let spec = json!({
            "paths": {
                "/chat.long": {
                    "get": {
                        "description": long,
                        "parameters": [{"name": "p", "description": "y".repeat(500)}]
                    }
                }
            }
        });
        let catalog = ApiCatalog::from_spec(&spec, "spec.json").unwrap();
        let method = &catalog.category("chat").unwrap()["chat.long"];
        assert_eq!(method.description.chars().count(), 200);
        assert_eq!(method.parameters[0].description.chars().count(), 100);
    }

    #[test]
    fn test_missing_info_uses_defaults() {
        let catalog = ApiCatalog::from_spec(&json!({"paths": {}}), "spec.json").unwrap();
        assert_eq!(catalog.title, "Slack Web API");
        assert_eq!(catalog.version, "unknown");
        assert_eq!(catalog.total_methods(), 0);
    }

    #[test]
    fn test_root_must_be_an_object() {
        let err = ApiCatalog::from_spec(&json!([1, 2, 3]), "spec.json").unwrap_err();
        assert!(matches!(err, OpenApiError::NotAnObject));
    }

    #[test]
    fn test_filter_category_narrows_the_catalog() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();

        let chat = catalog.filter_category("chat").unwrap();
        assert_eq!(chat.total_categories(), 1);
        assert_eq!(chat.total_methods(), 2);
        assert_eq!(chat.title, catalog.title);
        assert_eq!(chat.source, "spec.json");

        assert!(catalog.filter_category("nope").is_none());
    }

    #[test]
    fn test_flat_method_names_are_sorted() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        assert_eq!(
            catalog.method_names(),
            vec!["chat.delete", "chat.postMessage", "files.upload", "health", "users.list"]
        );
    }

    #[test]
    fn test_summary_counts() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "spec.json").unwrap();
        let summary = catalog.summary();
        assert_eq!(summary.total_methods, 5);
        assert_eq!(summary.total_categories, 4);
        assert_eq!(summary.categories["chat"].count, 2);
        assert_eq!(
            summary.categories["chat"].methods,
            vec!["chat.delete", "chat.postMessage"]
        );
    }

    #[test]
    fn test_export_shape() {
        let catalog = ApiCatalog::from_spec(&sample_spec(), "archived/spec.json").unwrap();
        let exported = serde_json::to_value(catalog.export()).unwrap();

        assert_eq!(exported["spec_info"]["title"], "Slack Web API");
        assert_eq!(exported["spec_info"]["version"], "2.0.0");
        assert_eq!(exported["spec_info"]["source"], "archived/spec.json");
        assert_eq!(exported["summary"]["total_methods"], 5);

        let method = &exported["methods_by_category"]["chat"]["chat.postMessage"];
        assert_eq!(method["http_method"], "POST");
        assert_eq!(method["parameters"][0]["type"], "string");
        // The name lives in the map key, not inside the method object.
        assert!(method.get("name").is_none());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openapi.json");
        fs::write(&path, serde_json::to_string(&sample_spec()).unwrap()).unwrap();

        let catalog = ApiCatalog::load(&path).unwrap();
        assert_eq!(catalog.total_methods(), 5);
        assert_eq!(catalog.source, path.display().to_string());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ApiCatalog::load(Path::new("/nonexistent/openapi.json")).unwrap_err();
        assert!(matches!(err, OpenApiError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/openapi.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openapi.json");
        fs::write(&path, "{not json").unwrap();

        let err = ApiCatalog::load(&path).unwrap_err();
        assert!(matches!(err, OpenApiError::Parse { .. }));
    }
}
