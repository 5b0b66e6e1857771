//! Pipeline domain types

use serde::{Deserialize, Serialize};

use super::operation::OperationDescriptor;

/// Ordered list of operations executed by the service, a.k.a. a recipe
///
/// Order is execution order. Serialized as a bare JSON array so it can be
/// dropped straight into a bake request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    operations: Vec<OperationDescriptor>,
}

impl Pipeline {
    pub fn new(operations: Vec<OperationDescriptor>) -> Self {
        Self { operations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new pipeline with `suffix` appended; `self` is left untouched
    /// so the same prefix can be extended once per catalog entry.
    pub fn extend(&self, suffix: OperationDescriptor) -> Pipeline {
        let mut operations = Vec::with_capacity(self.operations.len() + 1);
        operations.extend_from_slice(&self.operations);
        operations.push(suffix);
        Pipeline { operations }
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names joined with arrows, e.g. "From Base32 --> From Base64"
    pub fn summary(&self) -> String {
        self.operations
            .iter()
            .map(|op| op.name())
            .collect::<Vec<_>>()
            .join(" --> ")
    }
}

impl From<Vec<OperationDescriptor>> for Pipeline {
    fn from(operations: Vec<OperationDescriptor>) -> Self {
        Self::new(operations)
    }
}

impl FromIterator<OperationDescriptor> for Pipeline {
    fn from_iter<I: IntoIterator<Item = OperationDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
