use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Namespace prefix carried by every vanilla identifier in the source data.
pub const DEFAULT_NAMESPACE: &str = "minecraft:";

/// Canonical, namespace-stripped item identifier. Used as the map key for
/// items, recipes and item details.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Strip a single leading `namespace` from `raw`. Identifiers without the
/// prefix are returned unchanged.
pub fn strip_namespace<'a>(raw: &'a str, namespace: &str) -> &'a str {
    raw.strip_prefix(namespace).unwrap_or(raw)
}

/// Normalize a raw identifier into a canonical [`ItemId`].
pub fn normalize(raw: &str, namespace: &str) -> ItemId {
    ItemId(strip_namespace(raw, namespace).to_string())
}
