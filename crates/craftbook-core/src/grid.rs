//! Read-only placement of recipes onto the 3x3 crafting grid.
//!
//! Results are owned copies of the item details so presentation code can
//! hold them without borrowing the dataset. Lookups that fail degrade to
//! empty slots and a warning; they never return an error.

use crate::dataset::Dataset;
use crate::id::ItemId;
use crate::item::ItemDetails;
use crate::recipe::{Recipe, is_slot_label};
use crate::validation::GRID_SIZE;
use indexmap::IndexMap;
use tracing::warn;

/// Number of slots in the crafting grid.
pub const SLOT_COUNT: usize = GRID_SIZE * GRID_SIZE;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 3x3 crafting grid in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftingGrid {
    slots: [Option<ItemDetails>; SLOT_COUNT],
}

impl CraftingGrid {
    pub fn slots(&self) -> &[Option<ItemDetails>; SLOT_COUNT] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&ItemDetails> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Indices of the occupied slots, ascending.
    pub fn filled_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Three lines of item ids, `.` for an empty slot.
    pub fn render_ascii(&self) -> String {
        self.slots
            .chunks(GRID_SIZE)
            .map(|row| {
                row.iter()
                    .map(|slot| slot.as_ref().map_or(".", |d| d.id.as_str()))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Row and column offsets that center a `rows` x `cols` pattern. Odd gaps
/// put the extra empty line after the pattern.
pub fn centering_offsets(rows: usize, cols: usize) -> (usize, usize) {
    (
        GRID_SIZE.saturating_sub(rows) / 2,
        GRID_SIZE.saturating_sub(cols) / 2,
    )
}

/// Place `recipe` onto a grid using `details` for display data.
pub fn place(recipe: &Recipe, details: &IndexMap<ItemId, ItemDetails>) -> CraftingGrid {
    let mut grid = CraftingGrid::default();
    let rows = recipe.rows();
    let cols = recipe.width();

    if rows > GRID_SIZE || cols > GRID_SIZE {
        warn!(rows, cols, "pattern does not fit the crafting grid");
        return grid;
    }

    let (row_offset, col_offset) = centering_offsets(rows, cols);

    for (row, line) in recipe.pattern.iter().enumerate() {
        for (col, label) in line.chars().enumerate() {
            if !is_slot_label(label) {
                continue;
            }
            if !recipe.key.contains_key(&label) {
                warn!(row, col, %label, "pattern label has no key entry");
                continue;
            }
            let Some(item) = recipe.display_item(label) else {
                warn!(%label, "key entry has no items");
                continue;
            };
            if col + col_offset >= GRID_SIZE {
                warn!(row, col, %item, "pattern cell falls outside the grid");
                continue;
            }
            match details.get(item) {
                Some(d) => {
                    let index = (row + row_offset) * GRID_SIZE + (col + col_offset);
                    grid.slots[index] = Some(d.clone());
                }
                None => warn!(%item, "item details not found"),
            }
        }
    }

    grid
}

impl Dataset {
    /// The crafting grid for the recipe producing `recipe_id`. Unknown or
    /// empty ids yield an all-empty grid.
    pub fn crafting_table_state(&self, recipe_id: &str) -> CraftingGrid {
        if recipe_id.is_empty() {
            warn!("recipe id not provided");
            return CraftingGrid::default();
        }
        match self.recipes.get(recipe_id) {
            Some(recipe) => place(recipe, &self.item_details),
            None => {
                warn!(recipe_id, "no recipe found");
                CraftingGrid::default()
            }
        }
    }

    /// Display details for the item a recipe produces.
    pub fn result_item_details(&self, recipe_id: &str) -> Option<&ItemDetails> {
        if recipe_id.is_empty() {
            warn!("recipe id not provided");
            return None;
        }
        let details = self.item_details.get(recipe_id);
        if details.is_none() {
            warn!(recipe_id, "no result item details found");
        }
        details
    }
}
