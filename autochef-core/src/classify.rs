//! Result classifiers
//!
//! A classifier decides whether a bake produced something worth showing.
//! The default [`MarkerClassifier`] is deliberately coarse: it looks at the
//! raw response text only. [`PrintableClassifier`] looks at the decoded
//! bytes instead and is opt-in.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::transform::TransformResult;

/// Decides whether a transform result is a hit
pub trait Classifier: Send + Sync {
    fn is_hit(&self, result: &TransformResult) -> bool;
}

/// Hit when the raw response text contains `"string"` or `"iat"`
///
/// `"string"` is the service tagging its output type as text, `"iat"` is the
/// issued-at claim of a decoded JWT. Any body that merely contains either
/// substring also counts, and untagged readable output does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerClassifier;

impl MarkerClassifier {
    pub const MARKERS: [&'static str; 2] = ["string", "iat"];
}

impl Classifier for MarkerClassifier {
    fn is_hit(&self, result: &TransformResult) -> bool {
        match result {
            TransformResult::Success(output) => Self::MARKERS
                .iter()
                .any(|marker| output.raw.contains(marker)),
            TransformResult::Failure(_) => false,
        }
    }
}

/// Hit when enough of the decoded output is printable ASCII or whitespace
#[derive(Debug, Clone, Copy)]
pub struct PrintableClassifier {
    /// Minimum printable share, between 0 and 1
    pub threshold: f64,
}

impl Default for PrintableClassifier {
    fn default() -> Self {
        Self { threshold: 0.9 }
    }
}

impl PrintableClassifier {
    /// Share of printable bytes; 0 for empty output
    pub fn printable_ratio(bytes: &[u8]) -> f64 {
        if bytes.is_empty() {
            return 0.0;
        }
        let printable = bytes
            .iter()
            .filter(|b| b.is_ascii_graphic() || b.is_ascii_whitespace())
            .count();
        printable as f64 / bytes.len() as f64
    }
}

impl Classifier for PrintableClassifier {
    fn is_hit(&self, result: &TransformResult) -> bool {
        match result {
            TransformResult::Success(output) => {
                Self::printable_ratio(&output.bytes()) >= self.threshold
            }
            TransformResult::Failure(_) => false,
        }
    }
}

/// Classifier selection from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    #[default]
    Markers,
    Printable,
}

impl ClassifierKind {
    pub fn build(self) -> Box<dyn Classifier> {
        match self {
            ClassifierKind::Markers => Box::new(MarkerClassifier),
            ClassifierKind::Printable => Box::new(PrintableClassifier::default()),
        }
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markers" => Ok(ClassifierKind::Markers),
            "printable" => Ok(ClassifierKind::Printable),
            other => Err(format!(
                "unknown classifier `{}` (expected `markers` or `printable`)",
                other
            )),
        }
    }
}
