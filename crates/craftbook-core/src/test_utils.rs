//! Shared test fixtures for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::dataset::Dataset;
use crate::id::ItemId;
use crate::item::ItemDetails;
use crate::recipe::Recipe;

// ===========================================================================
// Builders
// ===========================================================================

pub fn item(id: &str) -> ItemId {
    ItemId::from(id)
}

pub fn item_list(ids: &[&str]) -> Vec<ItemId> {
    ids.iter().map(|id| item(id)).collect()
}

/// Build a resolved recipe from pattern rows and `(label, items)` pairs.
pub fn recipe(shaped: bool, pattern: &[&str], key: &[(char, &[&str])], count: u32) -> Recipe {
    Recipe {
        shaped,
        pattern: pattern.iter().map(|r| r.to_string()).collect(),
        key: key
            .iter()
            .map(|(label, items)| (*label, item_list(items)))
            .collect(),
        count,
    }
}

pub fn flat_details(id: &str) -> ItemDetails {
    ItemDetails::new(item(id), vec![format!("/textures/items/{id}.png")])
}

pub fn block_details(id: &str) -> ItemDetails {
    ItemDetails::new(
        item(id),
        vec![
            format!("/textures/blocks/{id}_top.png"),
            format!("/textures/blocks/{id}_side.png"),
        ],
    )
}

// ===========================================================================
// Recipes
// ===========================================================================

pub fn arrow_recipe() -> Recipe {
    recipe(
        true,
        &["X", "#", "Y"],
        &[('#', &["stick"]), ('X', &["flint"]), ('Y', &["feather"])],
        4,
    )
}

pub fn melon_block_recipe() -> Recipe {
    recipe(true, &["MMM", "MMM", "MMM"], &[('M', &["melon"])], 1)
}

pub fn melon_seeds_recipe() -> Recipe {
    recipe(false, &["M"], &[('M', &["melon"])], 1)
}

pub fn planks_recipe() -> Recipe {
    recipe(true, &["#"], &[('#', &["oak_log", "birch_log"])], 4)
}

pub fn torch_recipe() -> Recipe {
    recipe(
        true,
        &["X", "#"],
        &[('#', &["stick"]), ('X', &["coal", "charcoal"])],
        4,
    )
}

// ===========================================================================
// Dataset
// ===========================================================================

/// A small, consistent dataset covering the five fixture recipes.
pub fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::default();

    for id in [
        "arrow",
        "charcoal",
        "coal",
        "feather",
        "flint",
        "melon",
        "melon_seeds",
        "melon_block",
        "stick",
        "torch",
        "oak_log",
        "birch_log",
        "oak_planks",
    ] {
        dataset.items.insert(item(id));
        let details = if id.ends_with("_block") || id.ends_with("_log") || id.ends_with("_planks") {
            block_details(id)
        } else {
            flat_details(id)
        };
        dataset.item_details.insert(item(id), details);
    }

    dataset
        .item_groups
        .insert("logs".into(), item_list(&["oak_log", "birch_log"]));
    dataset
        .item_groups
        .insert("coals".into(), item_list(&["coal", "charcoal"]));

    dataset.recipes.insert(item("arrow"), arrow_recipe());
    dataset.recipes.insert(item("melon_block"), melon_block_recipe());
    dataset.recipes.insert(item("melon_seeds"), melon_seeds_recipe());
    dataset.recipes.insert(item("oak_planks"), planks_recipe());
    dataset.recipes.insert(item("torch"), torch_recipe());

    dataset
}
