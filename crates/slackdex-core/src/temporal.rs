//! # Temporal Types
//!
//! Calendar date type for descriptor fields such as `last-update` and
//! `last-commit`. The wire format is strictly `YYYY-MM-DD`: shape and
//! calendar validity are checked separately so that callers can report
//! `2024/01/01` (wrong shape) differently from `2024-13-45` (impossible
//! date).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A calendar date in strict `YYYY-MM-DD` form.
///
/// `chrono` alone would accept `2024-1-1`; the shape check here requires
/// zero-padded four-two-two digits before the calendar parse runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DescriptorDate(NaiveDate);

impl DescriptorDate {
    /// Parse a date from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DateFormat`] when the value is not
    /// shaped `YYYY-MM-DD`, and [`ValidationError::DateValue`] when the
    /// shape is right but the date does not exist on the calendar.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if !Self::has_wire_shape(value) {
            return Err(ValidationError::DateFormat(value.to_string()));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ValidationError::DateValue(value.to_string()))?;
        Ok(Self(date))
    }

    fn has_wire_shape(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
    }

    /// Create a date from a `chrono::NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Access the underlying `chrono::NaiveDate`.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The wire form, `YYYY-MM-DD`.
    pub fn to_wire_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for DescriptorDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire_string())
    }
}

impl TryFrom<String> for DescriptorDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DescriptorDate> for String {
    fn from(date: DescriptorDate) -> Self {
        date.to_wire_string()
    }
}
