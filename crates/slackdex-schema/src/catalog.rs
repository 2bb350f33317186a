//! # Lenient Catalog Loading
//!
//! Report generation must keep working while individual descriptor
//! files are broken, so catalog loading never fails on file content.
//! Files that cannot be read, parsed, or shaped into a mapping are
//! recorded in [`Catalog::skipped`] with a [`SkipReason`] and left out
//! of the project list. Only a missing or unreadable directory is an
//! error.

use std::path::Path;

use serde_json::Value;

use slackdex_core::Descriptor;

use crate::validate::{find_descriptor_files, yaml_to_json_value, SchemaError};

/// One descriptor file loaded into the catalog.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    /// Bare file name, e.g. `acme--slack-send.yaml`.
    pub file_name: String,
    /// Lenient projection of the document.
    pub descriptor: Descriptor,
    /// The raw JSON document as parsed, for `--json` export.
    pub raw: Value,
}

/// Why a file was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file parsed to null (empty file or lone `---`).
    EmptyDocument,
    /// The document is a scalar or sequence, not a mapping.
    NotAMapping,
    /// The YAML failed to parse.
    Parse(String),
    /// The file could not be read.
    Read(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyDocument => write!(f, "empty document"),
            SkipReason::NotAMapping => write!(f, "not a YAML mapping"),
            SkipReason::Parse(e) => write!(f, "YAML parsing error: {e}"),
            SkipReason::Read(e) => write!(f, "file read error: {e}"),
        }
    }
}

/// A file that did not make it into the catalog.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Bare file name of the skipped file.
    pub file_name: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// All loadable descriptors from a projects directory, in file name
/// order, plus the files that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Successfully loaded descriptors, ordered by file name.
    pub projects: Vec<LoadedProject>,
    /// Files left out, with reasons, ordered by file name.
    pub skipped: Vec<SkippedFile>,
}

impl Catalog {
    /// Load every `*.yaml` file directly under `projects_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DirNotFound`] when the directory is
    /// missing and [`SchemaError::Io`] when it cannot be scanned.
    /// Individual file failures land in [`Catalog::skipped`] instead.
    pub fn load(projects_dir: &Path) -> Result<Self, SchemaError> {
        let mut catalog = Catalog::default();
        for path in find_descriptor_files(projects_dir)? {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            match load_document(&path) {
                Ok(raw) => {
                    let descriptor = Descriptor::from_value(&raw);
                    catalog.projects.push(LoadedProject {
                        file_name,
                        descriptor,
                        raw,
                    });
                }
                Err(reason) => catalog.skipped.push(SkippedFile { file_name, reason }),
            }
        }
        Ok(catalog)
    }

    /// Number of loaded projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// True when no project loaded.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// The raw documents as a JSON array, each annotated with a
    /// `_filename` key, in catalog order.
    pub fn raw_json(&self) -> Value {
        let docs: Vec<Value> = self
            .projects
            .iter()
            .map(|p| {
                let mut doc = p.raw.clone();
                if let Some(obj) = doc.as_object_mut() {
                    obj.insert("_filename".to_string(), Value::String(p.file_name.clone()));
                }
                doc
            })
            .collect();
        Value::Array(docs)
    }

    /// Consume the catalog into its descriptors, preserving order.
    pub fn into_descriptors(self) -> Vec<Descriptor> {
        self.projects.into_iter().map(|p| p.descriptor).collect()
    }
}

fn load_document(path: &Path) -> Result<Value, SkipReason> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SkipReason::Read(e.to_string()))?;
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| SkipReason::Parse(e.to_string()))?;
    let doc = yaml_to_json_value(yaml);
    match doc {
        Value::Null => Err(SkipReason::EmptyDocument),
        Value::Object(_) => Ok(doc),
        _ => Err(SkipReason::NotAMapping),
    }
}
