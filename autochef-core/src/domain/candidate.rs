//! Candidate and search report types

use serde::{Deserialize, Serialize};

use super::operation::OperationDescriptor;
use super::pipeline::Pipeline;

/// One catalog entry tried as the final step of the detected prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position in the catalog
    pub index: usize,
    /// Short human-readable name, e.g. "RC2 Decrypt"
    pub label: String,
    /// The resolved suffix operation; `None` when the entry could not be built
    pub operation: Option<OperationDescriptor>,
    pub status: CandidateStatus,
}

/// How a candidate fared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    /// Baked and classified as readable output
    Hit { output: String },
    /// Baked but the output did not look readable
    Miss,
    /// The bake request failed
    Failed { reason: String },
    /// Never submitted (malformed entry or unresolved key material)
    Skipped { reason: String },
}

impl Candidate {
    pub fn is_hit(&self) -> bool {
        matches!(self.status, CandidateStatus::Hit { .. })
    }
}

/// Final result of a search run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Prefix pipeline suggested by auto-detection
    pub prefix: Pipeline,
    /// Every catalog entry, in catalog order
    pub candidates: Vec<Candidate>,
}

impl SearchReport {
    /// Display label of the prefix; `None` means the input was not recognized
    pub fn prefix_label(&self) -> Option<String> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(self.prefix.summary())
        }
    }

    /// `(label, output)` of every hit, in catalog order
    pub fn hits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.candidates.iter().filter_map(|c| match &c.status {
            CandidateStatus::Hit { output } => Some((c.label.as_str(), output.as_str())),
            _ => None,
        })
    }

    pub fn hit_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_hit()).count()
    }

    /// Number of candidates that were actually submitted to the service
    pub fn evaluated(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| !matches!(c.status, CandidateStatus::Skipped { .. }))
            .count()
    }
}
