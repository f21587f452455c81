//! Recipe types before and after tag resolution.
//!
//! Ingestion produces [`PendingRecipe`]s whose key entries may still name a
//! symbolic tag. Tag resolution turns each one into a [`Recipe`] whose key
//! only holds concrete item lists.

use crate::id::ItemId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Character that marks an empty cell in a recipe pattern.
pub const BLANK: char = ' ';

/// Returns `true` if `label` is a real slot label rather than padding.
pub fn is_slot_label(label: char) -> bool {
    label != BLANK
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

/// A reference to the items that can fill a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ingredient {
    /// Any one of these items satisfies the slot.
    Items(Vec<ItemId>),
    /// A named item group, resolved later.
    Tag(String),
}

impl Ingredient {
    pub fn item(id: impl Into<ItemId>) -> Self {
        Ingredient::Items(vec![id.into()])
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Ingredient::Tag(name.into())
    }

    /// The concrete alternatives, or `None` for a tag reference.
    pub fn items(&self) -> Option<&[ItemId]> {
        match self {
            Ingredient::Items(items) => Some(items),
            Ingredient::Tag(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pending (pre-resolution) recipe
// ---------------------------------------------------------------------------

/// A recipe as ingested, possibly with symbolic tag references in its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecipe {
    pub shaped: bool,
    pub pattern: Vec<String>,
    pub key: IndexMap<char, Ingredient>,
    pub count: u32,
}

impl PendingRecipe {
    /// Returns `true` if any key entry is still a tag reference.
    pub fn has_tags(&self) -> bool {
        self.key.values().any(|i| matches!(i, Ingredient::Tag(_)))
    }
}

impl From<&Recipe> for PendingRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            shaped: recipe.shaped,
            pattern: recipe.pattern.clone(),
            key: recipe
                .key
                .iter()
                .map(|(label, items)| (*label, Ingredient::Items(items.clone())))
                .collect(),
            count: recipe.count,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved recipe
// ---------------------------------------------------------------------------

fn default_count() -> u32 {
    1
}

/// A fully resolved crafting-table recipe, keyed in the dataset by its
/// output item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub shaped: bool,
    /// Pattern rows, top to bottom. Each character is a slot label or
    /// [`BLANK`].
    pub pattern: Vec<String>,
    /// Slot label to the alternatives that may fill it.
    pub key: IndexMap<char, Vec<ItemId>>,
    /// Number of output items produced.
    #[serde(default = "default_count")]
    pub count: u32,
}

impl Recipe {
    /// Number of pattern rows.
    pub fn rows(&self) -> usize {
        self.pattern.len()
    }

    /// Width of the first pattern row, which drives horizontal centering.
    pub fn width(&self) -> usize {
        self.pattern.first().map_or(0, |row| row.chars().count())
    }

    /// The item displayed for a slot label: always the first alternative.
    pub fn display_item(&self, label: char) -> Option<&ItemId> {
        self.key.get(&label).and_then(|items| items.first())
    }
}
