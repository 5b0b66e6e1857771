//! Detection domain types

use serde::{Deserialize, Serialize};

use super::pipeline::Pipeline;
use crate::dto::magic::{MagicEntry, MagicResponse};

/// Ranked auto-detection result; rank 0 is the service's best guess
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub candidates: Vec<MagicCandidate>,
}

/// One suggested decoding pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicCandidate {
    pub recipe: Pipeline,
    pub preview: Option<String>,
    pub entropy: Option<f64>,
}

impl DetectionResult {
    /// The best-ranked recipe, or an empty pipeline when nothing was detected
    pub fn best(&self) -> Pipeline {
        self.candidates
            .first()
            .map(|c| c.recipe.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<MagicEntry> for MagicCandidate {
    fn from(entry: MagicEntry) -> Self {
        let preview = entry.data.map(|data| match data {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Self {
            recipe: entry.recipe,
            preview,
            entropy: entry.entropy,
        }
    }
}

impl From<MagicResponse> for DetectionResult {
    fn from(response: MagicResponse) -> Self {
        Self {
            candidates: response.value.into_iter().map(Into::into).collect(),
        }
    }
}
