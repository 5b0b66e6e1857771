//! Bake outcome types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::dto::bake::BakeResponse;

/// Outcome of baking one pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformResult {
    Success(BakeOutput),
    Failure(TransformFailure),
}

impl TransformResult {
    pub fn failure(status: Option<u16>, message: impl Into<String>) -> Self {
        TransformResult::Failure(TransformFailure {
            status,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransformResult::Success(_))
    }

    pub fn output(&self) -> Option<&BakeOutput> {
        match self {
            TransformResult::Success(output) => Some(output),
            TransformResult::Failure(_) => None,
        }
    }
}

/// A successful bake: the raw response text plus its parsed fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeOutput {
    /// Response body exactly as received
    pub raw: String,
    pub output_type: String,
    pub value: JsonValue,
}

impl BakeOutput {
    /// Parse a `/bake` response body, keeping the raw text alongside
    pub fn from_body(raw: impl Into<String>) -> Result<Self, serde_json::Error> {
        let raw = raw.into();
        let response: BakeResponse = serde_json::from_str(&raw)?;
        Ok(Self {
            raw,
            output_type: response.output_type,
            value: response.value,
        })
    }

    /// Output bytes: byte arrays are decoded, strings are taken as UTF-8,
    /// a missing `value` falls back to the raw body, anything else is the
    /// compact JSON rendering.
    pub fn bytes(&self) -> Vec<u8> {
        match &self.value {
            JsonValue::Null => self.raw.as_bytes().to_vec(),
            JsonValue::String(s) => s.as_bytes().to_vec(),
            value => match byte_array(value) {
                Some(bytes) => bytes,
                None => value.to_string().into_bytes(),
            },
        }
    }

    /// Output rendered as text (lossy for invalid UTF-8)
    pub fn text(&self) -> String {
        match &self.value {
            JsonValue::Null => self.raw.clone(),
            JsonValue::String(s) => s.clone(),
            value => match byte_array(value) {
                Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                None => value.to_string(),
            },
        }
    }
}

fn byte_array(value: &JsonValue) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

/// A failed bake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformFailure {
    /// HTTP status, `None` when the request never got a response
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for TransformFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
