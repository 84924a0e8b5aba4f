//! Canonical content shapes.
//!
//! Every materialized resource holds exactly one of these. Numbers are
//! stored as `{ "identity": <integer> }`; domain failures as
//! `{ "name", "description", "details"? }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Content of a persisted integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericPayload {
    pub identity: i64,
}

impl NumericPayload {
    pub fn new(identity: i64) -> Self {
        Self { identity }
    }

    /// Decode raw stored content into its integer value.
    ///
    /// `path` is only used for error reporting. Numbers that are not exact
    /// integers are rejected rather than rounded.
    pub fn decode(path: &str, raw: &str) -> Result<i64> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::malformed(path, format!("content is not valid JSON: {}", e)))?;

        let identity = value
            .get("identity")
            .ok_or_else(|| Error::malformed(path, "content has no identity field"))?;

        if let Some(n) = identity.as_i64() {
            return Ok(n);
        }

        match identity.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(f as i64)
            }
            Some(f) => Err(Error::malformed(
                path,
                format!("identity {} is not an integer", f),
            )),
            None => Err(Error::malformed(path, "identity is not a number")),
        }
    }
}

/// Content of a domain failure, stored like any other output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorPayload {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// The content of one materialized resource: a number or a domain error,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceContent {
    Numeric(NumericPayload),
    Error(ErrorPayload),
}

impl ResourceContent {
    pub fn numeric(identity: i64) -> Self {
        ResourceContent::Numeric(NumericPayload::new(identity))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResourceContent::Error(_))
    }

    /// Serialize into the canonical stored string.
    pub fn to_canonical_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize into a JSON value, for protocols that embed content inline.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<NumericPayload> for ResourceContent {
    fn from(payload: NumericPayload) -> Self {
        ResourceContent::Numeric(payload)
    }
}

impl From<ErrorPayload> for ResourceContent {
    fn from(payload: ErrorPayload) -> Self {
        ResourceContent::Error(payload)
    }
}
