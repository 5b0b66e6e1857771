//! Operation domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single operation of a recipe, as understood by the transformation service
///
/// Serialized as `{"op": "From Base64", "args": ["A-Za-z0-9+/=", true, false]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub op: String,
    #[serde(default)]
    pub args: Vec<Argument>,
}

impl OperationDescriptor {
    pub fn new(op: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            op: op.into(),
            args,
        }
    }

    /// Operation name, e.g. "RC2 Decrypt"
    pub fn name(&self) -> &str {
        &self.op
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)
    }
}

/// Operation argument
///
/// Primitive values map to their JSON counterpart. Key material uses the
/// service's `{"option": "Hex", "string": "..."}` shape. Anything else the
/// service sends back is kept verbatim in `Other` so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Toggle(bool),
    Number(serde_json::Number),
    Text(String),
    Keyed(KeyedValue),
    Other(serde_json::Value),
}

impl Argument {
    /// Build a keyed argument, e.g. `Argument::keyed("Hex", "0011")`
    pub fn keyed(option: impl Into<String>, string: impl Into<String>) -> Self {
        Argument::Keyed(KeyedValue {
            option: option.into(),
            string: string.into(),
        })
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Text(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Text(s)
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Toggle(b)
    }
}

impl From<i64> for Argument {
    fn from(n: i64) -> Self {
        Argument::Number(n.into())
    }
}

/// Encoded key material: the encoding option plus the encoded string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyedValue {
    pub option: String,
    pub string: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_arguments() {
        let op: OperationDescriptor = serde_json::from_value(json!({
            "op": "RC2 Decrypt",
            "args": [{"option": "Hex", "string": ""}, "Hex", true, 10, null]
        }))
        .unwrap();

        assert_eq!(op.name(), "RC2 Decrypt");
        assert_eq!(op.args[0], Argument::keyed("Hex", ""));
        assert_eq!(op.args[1], Argument::from("Hex"));
        assert_eq!(op.args[2], Argument::Toggle(true));
        assert_eq!(op.args[3], Argument::from(10i64));
        assert_eq!(op.args[4], Argument::Other(serde_json::Value::Null));
    }

    #[test]
    fn test_unknown_object_is_kept_as_other() {
        let arg: Argument = serde_json::from_value(json!({"option": "Hex", "extra": 1})).unwrap();
        assert!(matches!(arg, Argument::Other(_)));
    }

    #[test]
    fn test_missing_args_defaults_to_empty() {
        let op: OperationDescriptor = serde_json::from_value(json!({"op": "ROT47"})).unwrap();
        assert!(op.args.is_empty());
    }

    #[test]
    fn test_serializes_in_service_shape() {
        let op = OperationDescriptor::new(
            "From Base32",
            vec![Argument::from("A-Z2-7="), Argument::from(true)],
        );
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "From Base32", "args": ["A-Z2-7=", true]})
        );
    }
}
