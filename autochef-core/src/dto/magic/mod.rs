//! Magic (auto-detection) DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::pipeline::Pipeline;

/// Body of `POST /magic`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicRequest {
    pub input: String,
    pub args: MagicArgs,
}

/// Arguments forwarded to the service's Magic operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicArgs {
    /// How many chained encodings the service tries to peel
    pub depth: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub intensive: bool,
    #[serde(
        rename = "extLang",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub ext_lang: bool,
}

impl Default for MagicArgs {
    fn default() -> Self {
        Self {
            depth: 1,
            intensive: false,
            ext_lang: false,
        }
    }
}

/// Successful `/magic` response: candidates ranked best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicResponse {
    #[serde(default)]
    pub value: Vec<MagicEntry>,
}

/// One ranked candidate of a `/magic` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicEntry {
    #[serde(default)]
    pub recipe: Pipeline,
    /// Output preview; usually a string, kept loose since the service does not promise it
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub entropy: Option<f64>,
}
