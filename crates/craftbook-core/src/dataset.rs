//! The generated crafting dataset and the accumulator that builds it.
//!
//! Two-phase lifecycle: a [`DatasetBuilder`] collects items and pending
//! recipes while definitions are ingested, then tag resolution and item
//! details turn it into an immutable [`Dataset`].

use crate::id::ItemId;
use crate::item::ItemDetails;
use crate::recipe::{PendingRecipe, Recipe};
use crate::validation::{RecipeError, validate_pattern};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Item group name to its ordered members.
pub type ItemGroups = IndexMap<String, Vec<ItemId>>;

/// Errors found when checking a dataset's internal consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("recipe for '{recipe}' is invalid: {source}")]
    InvalidRecipe { recipe: ItemId, source: RecipeError },
    #[error("item group '{group}' is empty")]
    EmptyGroup { group: String },
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Accumulator threaded through ingestion.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    items: IndexSet<ItemId>,
    recipes: IndexMap<ItemId, PendingRecipe>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Returns `true` if it was not known yet.
    pub fn register_item(&mut self, id: ItemId) -> bool {
        self.items.insert(id)
    }

    /// Insert the recipe for `output`, replacing any earlier one while
    /// keeping its position. Returns the replaced recipe.
    pub fn insert_recipe(&mut self, output: ItemId, recipe: PendingRecipe) -> Option<PendingRecipe> {
        self.recipes.insert(output, recipe)
    }

    pub fn items(&self) -> &IndexSet<ItemId> {
        &self.items
    }

    pub fn pending_recipes(&self) -> &IndexMap<ItemId, PendingRecipe> {
        &self.recipes
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn into_parts(self) -> (IndexSet<ItemId>, IndexMap<ItemId, PendingRecipe>) {
        (self.items, self.recipes)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Immutable, queryable crafting data. Iteration order everywhere is the
/// order in which entries were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub items: IndexSet<ItemId>,
    pub item_groups: ItemGroups,
    pub recipes: IndexMap<ItemId, Recipe>,
    pub item_details: IndexMap<ItemId, ItemDetails>,
}

impl Dataset {
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn details(&self, id: &str) -> Option<&ItemDetails> {
        self.item_details.get(id)
    }

    pub fn group(&self, name: &str) -> Option<&[ItemId]> {
        self.item_groups.get(name).map(Vec::as_slice)
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    /// Check that every recipe fits the grid with a complete key and that
    /// no empty group was kept.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (output, recipe) in &self.recipes {
            validate_pattern(&recipe.pattern, &recipe.key).map_err(|source| {
                DatasetError::InvalidRecipe {
                    recipe: output.clone(),
                    source,
                }
            })?;
        }
        if let Some((group, _)) = self.item_groups.iter().find(|(_, m)| m.is_empty()) {
            return Err(DatasetError::EmptyGroup {
                group: group.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Ingredient;
    use crate::test_utils::*;

    fn pending(label: char, item: &str) -> PendingRecipe {
        PendingRecipe {
            shaped: true,
            pattern: vec![label.to_string()],
            key: [(label, Ingredient::item(item))].into_iter().collect(),
            count: 1,
        }
    }

    #[test]
    fn register_item_deduplicates() {
        let mut builder = DatasetBuilder::new();
        assert!(builder.register_item(ItemId::from("stick")));
        assert!(!builder.register_item(ItemId::from("stick")));
        assert!(builder.register_item(ItemId::from("flint")));
        assert_eq!(builder.item_count(), 2);
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut builder = DatasetBuilder::new();
        builder.insert_recipe(ItemId::from("torch"), pending('#', "coal"));
        builder.insert_recipe(ItemId::from("arrow"), pending('#', "flint"));
        let replaced = builder.insert_recipe(ItemId::from("torch"), pending('#', "charcoal"));

        assert_eq!(replaced, Some(pending('#', "coal")));
        let (_, recipes) = builder.into_parts();
        let order: Vec<&str> = recipes.keys().map(ItemId::as_str).collect();
        assert_eq!(order, ["torch", "arrow"]);
        assert_eq!(recipes["torch"], pending('#', "charcoal"));
    }

    #[test]
    fn lookups_by_str() {
        let dataset = sample_dataset();
        assert!(dataset.recipe("arrow").is_some());
        assert!(dataset.recipe("diamond").is_none());
        assert_eq!(dataset.details("flint").map(|d| d.name.as_str()), Some("Flint"));
        assert!(dataset.contains_item("melon"));
        assert_eq!(dataset.group("logs").map(<[ItemId]>::len), Some(2));
    }

    #[test]
    fn sample_dataset_is_valid() {
        assert_eq!(sample_dataset().validate(), Ok(()));
    }

    #[test]
    fn validate_reports_broken_recipe() {
        let mut dataset = sample_dataset();
        dataset
            .recipes
            .get_mut("arrow")
            .unwrap()
            .key
            .shift_remove(&'Y');
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::InvalidRecipe {
                recipe: ItemId::from("arrow"),
                source: RecipeError::MissingKey { label: 'Y' },
            })
        );
    }

    #[test]
    fn validate_reports_row_past_grid_edge() {
        let mut dataset = sample_dataset();
        dataset.recipes.get_mut("arrow").unwrap().pattern = vec!["X".into(), "###".into()];
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::InvalidRecipe {
                recipe: ItemId::from("arrow"),
                source: RecipeError::RowOffGrid {
                    row: 1,
                    width: 3,
                    offset: 1
                },
            })
        );
    }

    #[test]
    fn validate_reports_empty_group() {
        let mut dataset = sample_dataset();
        dataset.item_groups.insert("wool".into(), vec![]);
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::EmptyGroup {
                group: "wool".into()
            })
        );
    }
}
