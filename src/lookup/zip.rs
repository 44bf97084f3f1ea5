//! ZIP code validation.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::LookupError;

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("ZIP pattern is a valid regex"));

/// A validated 5-digit US ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    /// Validate a raw value exactly as given. Whitespace is not stripped.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        if ZIP_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(LookupError::InvalidZip)
        }
    }

    /// Validate an optional raw value (absent means invalid).
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, LookupError> {
        raw.map_or(Err(LookupError::InvalidZip), Self::parse)
    }

    /// The ZIP as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The raw `zip` field of a JSON request body. Non-string values count as absent.
pub fn zip_field(body: &Value) -> Option<&str> {
    body.get("zip").and_then(Value::as_str)
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
