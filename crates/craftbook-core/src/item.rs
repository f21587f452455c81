use crate::id::ItemId;
use serde::{Deserialize, Serialize};

/// Public path of the icon used when no texture could be found for an item.
pub const PLACEHOLDER_ICON: &str = "/textures/items/stick.png";

/// Display record for an item.
///
/// One icon path is a flat item sprite; two are a block drawn from its top
/// and side faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub id: ItemId,
    pub name: String,
    pub icon: Vec<String>,
}

impl ItemDetails {
    pub fn new(id: ItemId, icon: Vec<String>) -> Self {
        let name = display_name(id.as_str());
        Self { id, name, icon }
    }

    /// Returns `true` if the icon is drawn as a block (top + side).
    pub fn is_block_icon(&self) -> bool {
        self.icon.len() == 2
    }
}

/// Human-readable name: each `_`-separated segment gets an upper-case first
/// letter, segments are joined with spaces.
pub fn display_name(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
