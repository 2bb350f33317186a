//! # slackdex-schema — Descriptor Validation and Catalog Loading
//!
//! Validates project descriptor YAML files against the slackdex field
//! rules and loads descriptor directories into an in-memory catalog.
//!
//! The two concerns are deliberately separate:
//!
//! - [`validate`] is strict and graded: every rule violation becomes a
//!   [`Diagnostic`] with [`Severity::Error`] or [`Severity::Warning`],
//!   mirroring the CI contract (errors always fail, warnings fail only
//!   under `--strict`).
//! - [`catalog`] is lenient: report generation should never be blocked
//!   by one bad file, so unreadable or empty documents are skipped and
//!   recorded rather than propagated as errors.
//!
//! Rule violations are data, not `Err` values; [`SchemaError`] is
//! reserved for environmental failures such as a missing descriptor
//! directory.

pub mod catalog;
pub mod validate;

pub use catalog::{Catalog, LoadedProject, SkipReason, SkippedFile};
pub use validate::{
    find_descriptor_files, validate_dir, validate_file, validate_value, yaml_to_json_value,
    Diagnostic, FileReport, SchemaError, Severity, ValidationSummary,
};
