//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation runs before any mutation and names the offending field both
//! in the message and in the structured details.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must not be empty")).with_details(json!({
        "field": field,
        "code": "blank_field",
    }))
}

/// Presence check for a required request field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Presence plus non-blank check for a required string field. Returns the
/// trimmed value.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let raw = require(value, field)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(blank_field_error(field));
    }
    Ok(trimmed.to_owned())
}
