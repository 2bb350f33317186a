//! # Origin Newtypes
//!
//! Validated wrappers for the fields that point at a tool's upstream
//! repository: the repository URL and the pinned commit hash. Both are
//! distinct types so a hash cannot be passed where a URL is expected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A repository URL with an HTTP scheme.
///
/// # Validation
///
/// - Must start with `http://` or `https://`
///
/// No further URL grammar is enforced; descriptor files carry links to
/// arbitrary forges and the only invariant reports rely on is that the
/// value renders as a clickable markdown link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoUrl(String);

impl RepoUrl {
    /// Create a repository URL, validating the scheme prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UrlScheme`] when the value does not
    /// start with `http://` or `https://`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            return Err(ValidationError::UrlScheme(s));
        }
        Ok(Self(s))
    }

    /// Access the URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A git commit hash, abbreviated or full.
///
/// # Validation
///
/// - 7 to 40 characters
/// - ASCII hexadecimal only, either case
///
/// Case is preserved as given; hashes are compared as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitHash(String);

impl CommitHash {
    /// Create a commit hash, validating length and character set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CommitHash`] when the value is outside
    /// 7-40 characters or contains a non-hex character.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !(7..=40).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::CommitHash(s));
        }
        Ok(Self(s))
    }

    /// Access the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn repo_url_accepts_http_schemes() {
        assert!(RepoUrl::new("https://github.com/owner/repo").is_ok());
        assert!(RepoUrl::new("http://example.com").is_ok());
    }

    #[test]
    fn repo_url_rejects_other_schemes() {
        assert!(RepoUrl::new("git@github.com:owner/repo.git").is_err());
        assert!(RepoUrl::new("ftp://example.com").is_err());
        assert!(RepoUrl::new("github.com/owner/repo").is_err());
        assert!(RepoUrl::new("").is_err());
    }

    #[test]
    fn commit_hash_accepts_short_and_full() {
        assert!(CommitHash::new("abc1234").is_ok());
        assert!(CommitHash::new("ABC1234").is_ok()); // case preserved
        assert!(CommitHash::new("a".repeat(40)).is_ok());
    }

    #[test]
    fn commit_hash_rejects_out_of_range() {
        assert!(CommitHash::new("abc123").is_err()); // 6 chars
        assert!(CommitHash::new("a".repeat(41)).is_err());
        assert!(CommitHash::new("abc123g").is_err()); // non-hex
        assert!(CommitHash::new("").is_err());
    }

    #[test]
    fn commit_hash_keeps_original_case() {
        let h = CommitHash::new("DeadBeef01").unwrap();
        assert_eq!(h.as_str(), "DeadBeef01");
    }

    proptest! {
        #[test]
        fn commit_hash_accepts_exactly_hex_7_to_40(s in "[0-9a-fA-F]{7,40}") {
            prop_assert!(CommitHash::new(s).is_ok());
        }

        #[test]
        fn commit_hash_never_panics(s in "\\PC{0,64}") {
            let _ = CommitHash::new(s);
        }
    }
}
