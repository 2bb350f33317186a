//! # Error Types
//!
//! Construction-time validation errors for the format newtypes, built with
//! `thiserror`. Each variant carries the rejected input so that a diagnostic
//! can be produced without re-parsing.

use thiserror::Error;

/// Validation errors for descriptor format newtypes.
///
/// The two date variants are distinct on purpose: a value can have the
/// right `YYYY-MM-DD` shape and still name an impossible calendar date
/// (`2024-13-45`), and the diagnostics for the two cases differ.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value does not have the `YYYY-MM-DD` shape.
    #[error("invalid date format: \"{0}\" (expected YYYY-MM-DD)")]
    DateFormat(String),

    /// The value has the right shape but is not a real calendar date.
    #[error("invalid date value: \"{0}\"")]
    DateValue(String),

    /// Repository URLs must use an HTTP scheme.
    #[error("invalid URL: \"{0}\" (must start with http:// or https://)")]
    UrlScheme(String),

    /// Commit hashes are 7 to 40 hexadecimal characters.
    #[error("invalid commit hash: \"{0}\" (expected 7-40 hex characters)")]
    CommitHash(String),
}
