//! Recipe catalog
//!
//! The catalog is an ordered list of operation templates, each one a guess
//! at the final decoding step of an input. Templates are plain JSON in the
//! same `{"op", "args"}` shape the service uses, except that key material is
//! declared as an explicit slot:
//!
//! ```json
//! {"op": "RC2 Decrypt", "args": [{"slot": "key", "option": "Hex"}, {"slot": "iv", "option": "Hex"}, "Hex", "Raw"]}
//! ```
//!
//! Slots are filled from [`KeyMaterial`] when an entry is resolved into an
//! [`OperationDescriptor`]. An unfilled key or IV slot is "unresolved": under
//! [`SlotPolicy::Blank`] it is sent as an empty string (the service default),
//! under [`SlotPolicy::Strict`] the entry is refused.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

use crate::domain::operation::{Argument, OperationDescriptor};

/// Built-in catalog, embedded at compile time
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/default.json");

/// Errors raised while loading or resolving catalog entries
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is valid JSON but not an array
    #[error("Catalog must be a JSON array of operations")]
    NotAnArray,

    /// A key or IV slot had no value under the strict policy
    #[error("{op}: no {role} supplied")]
    UnresolvedSlot { op: String, role: SlotRole },
}

/// What a slot stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Key,
    Iv,
    /// Optional material such as a GCM tag or AAD; always sent empty
    Auxiliary,
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRole::Key => write!(f, "key"),
            SlotRole::Iv => write!(f, "iv"),
            SlotRole::Auxiliary => write!(f, "auxiliary"),
        }
    }
}

/// Placeholder for key material inside a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSpec {
    pub slot: SlotRole,
    /// Encoding option ("Hex", "UTF8", ...). Without one the slot renders as a plain string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

impl SlotSpec {
    fn render(&self, value: &str) -> Argument {
        match &self.option {
            Some(option) => Argument::keyed(option.clone(), value),
            None => Argument::Text(value.to_string()),
        }
    }
}

/// One template argument: a fixed value or a slot
///
/// Any object carrying a `slot` key is read as a slot, so a misspelt role
/// is a load error rather than a literal sent to the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateArg {
    Slot(SlotSpec),
    Fixed(Argument),
}

impl<'de> Deserialize<'de> for TemplateArg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        if value.get("slot").is_some() {
            SlotSpec::deserialize(value)
                .map(TemplateArg::Slot)
                .map_err(de::Error::custom)
        } else {
            Argument::deserialize(value)
                .map(TemplateArg::Fixed)
                .map_err(de::Error::custom)
        }
    }
}

/// Key material available to fill slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMaterial {
    pub key: Option<String>,
    pub iv: Option<String>,
}

impl KeyMaterial {
    fn lookup(&self, role: SlotRole) -> Option<&str> {
        match role {
            SlotRole::Key => self.key.as_deref(),
            SlotRole::Iv => self.iv.as_deref(),
            SlotRole::Auxiliary => Some(""),
        }
    }
}

/// What to do with a key or IV slot nobody filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Send an empty string and let the service fall back to its default
    #[default]
    Blank,
    /// Refuse to build the operation
    Strict,
}

/// An operation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub op: String,
    #[serde(default)]
    pub args: Vec<TemplateArg>,
}

impl CatalogEntry {
    pub fn slots(&self) -> impl Iterator<Item = &SlotSpec> {
        self.args.iter().filter_map(|arg| match arg {
            TemplateArg::Slot(slot) => Some(slot),
            TemplateArg::Fixed(_) => None,
        })
    }

    /// Key and IV slots that `keys` leaves empty
    pub fn unresolved(&self, keys: &KeyMaterial) -> Vec<SlotRole> {
        self.slots()
            .filter(|slot| keys.lookup(slot.slot).is_none())
            .map(|slot| slot.slot)
            .collect()
    }

    /// Build the concrete operation, filling every slot
    pub fn resolve(
        &self,
        keys: &KeyMaterial,
        policy: SlotPolicy,
    ) -> Result<OperationDescriptor, CatalogError> {
        let mut args = Vec::with_capacity(self.args.len());

        for arg in &self.args {
            let arg = match arg {
                TemplateArg::Fixed(arg) => arg.clone(),
                TemplateArg::Slot(slot) => match (keys.lookup(slot.slot), policy) {
                    (Some(value), _) => slot.render(value),
                    (None, SlotPolicy::Blank) => slot.render(""),
                    (None, SlotPolicy::Strict) => {
                        return Err(CatalogError::UnresolvedSlot {
                            op: self.op.clone(),
                            role: slot.slot,
                        });
                    }
                },
            };
            args.push(arg);
        }

        Ok(OperationDescriptor::new(self.op.clone(), args))
    }
}

/// A catalog position: a usable template or the reason it could not be read
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Entry(CatalogEntry),
    Malformed { label: String, reason: String },
}

impl CatalogItem {
    pub fn label(&self) -> &str {
        match self {
            CatalogItem::Entry(entry) => &entry.op,
            CatalogItem::Malformed { label, .. } => label,
        }
    }
}

/// Ordered collection of candidate final operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// The built-in catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON array
    ///
    /// Entries are parsed one at a time: an entry that does not parse is kept
    /// in place as [`CatalogItem::Malformed`] instead of failing the load.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: JsonValue = serde_json::from_str(json)?;
        let JsonValue::Array(values) = document else {
            return Err(CatalogError::NotAnArray);
        };

        let items = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let label = value
                    .get("op")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("entry #{}", index));

                match serde_json::from_value::<CatalogEntry>(value) {
                    Ok(entry) => CatalogItem::Entry(entry),
                    Err(e) => CatalogItem::Malformed {
                        label,
                        reason: e.to_string(),
                    },
                }
            })
            .collect();

        Ok(Self { items })
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            items: entries.into_iter().map(CatalogItem::Entry).collect(),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn malformed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, CatalogItem::Malformed { .. }))
            .count()
    }
}
