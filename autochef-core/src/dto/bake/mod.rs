//! Bake (pipeline execution) DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::pipeline::Pipeline;

/// Body of `POST /bake`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeRequest {
    /// Always the original raw input; the service applies the whole recipe
    pub input: String,
    pub recipe: Pipeline,
}

/// Successful `/bake` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeResponse {
    /// `Null` when the service answered with a bare JSON document
    #[serde(default)]
    pub value: JsonValue,
    /// How to interpret `value`, e.g. "string", "byteArray", "number"
    #[serde(rename = "type", default)]
    pub output_type: String,
}
