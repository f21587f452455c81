//! Item group discovery and tag substitution.
//!
//! Groups are not declared anywhere in the source data. They are inferred
//! from recipe names after ingestion: every output containing `planks` is a
//! plank, and every concrete ingredient of a plank recipe containing `log`
//! or `stem` is a log. Tag references are then replaced by the group's
//! members, or by the tag name itself when the group is unknown or empty.

use craftbook_core::dataset::ItemGroups;
use craftbook_core::id::ItemId;
use craftbook_core::recipe::{Ingredient, PendingRecipe, Recipe};
use indexmap::IndexMap;
use tracing::{info, warn};

pub const PLANKS: &str = "planks";
pub const LOGS: &str = "logs";

/// Outcome of resolving every pending recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagResolution {
    pub recipes: IndexMap<ItemId, Recipe>,
    /// Only non-empty groups.
    pub groups: ItemGroups,
    /// Number of tag references that fell back to their literal name.
    pub fallbacks: usize,
}

// ---------------------------------------------------------------------------
// Pass 1: discovery
// ---------------------------------------------------------------------------

fn push_unique(list: &mut Vec<ItemId>, id: &ItemId) {
    if !list.contains(id) {
        list.push(id.clone());
    }
}

fn is_log(id: &ItemId) -> bool {
    id.as_str().contains("log") || id.as_str().contains("stem")
}

/// Collect the known groups from recipe outputs and inputs. Both groups are
/// always present in the result, possibly empty.
pub fn discover_groups(recipes: &IndexMap<ItemId, PendingRecipe>) -> ItemGroups {
    let mut planks = Vec::new();
    let mut logs = Vec::new();

    for (output, recipe) in recipes {
        if !output.as_str().contains(PLANKS) {
            continue;
        }
        for ingredient in recipe.key.values() {
            let Some(items) = ingredient.items() else {
                continue;
            };
            for id in items.iter().filter(|id| is_log(id)) {
                push_unique(&mut logs, id);
            }
        }
        push_unique(&mut planks, output);
    }

    let mut groups = ItemGroups::new();
    groups.insert(PLANKS.to_string(), planks);
    groups.insert(LOGS.to_string(), logs);
    groups
}

// ---------------------------------------------------------------------------
// Pass 2: substitution
// ---------------------------------------------------------------------------

/// Concrete items for a tag: the group's members, or the tag name as a
/// literal item when the group is unknown or empty.
pub fn tag_members(tag: &str, groups: &ItemGroups) -> (Vec<ItemId>, bool) {
    match groups.get(tag) {
        Some(members) if !members.is_empty() => (members.clone(), false),
        _ => (vec![ItemId::from(tag)], true),
    }
}

/// Resolve one recipe against `groups`. Returns the recipe and how many
/// tags fell back to their literal name.
pub fn resolve_recipe(recipe: &PendingRecipe, groups: &ItemGroups) -> (Recipe, usize) {
    let mut fallbacks = 0;
    let key = recipe
        .key
        .iter()
        .map(|(label, ingredient)| {
            let items = match ingredient {
                Ingredient::Items(items) => items.clone(),
                Ingredient::Tag(tag) => {
                    let (members, fell_back) = tag_members(tag, groups);
                    if fell_back {
                        warn!(tag = %tag, "tag has no resolved items, using its name");
                        fallbacks += 1;
                    }
                    members
                }
            };
            (*label, items)
        })
        .collect();

    let resolved = Recipe {
        shaped: recipe.shaped,
        pattern: recipe.pattern.clone(),
        key,
        count: recipe.count,
    };
    (resolved, fallbacks)
}

/// Drop groups without members.
pub fn finalize_groups(groups: ItemGroups) -> ItemGroups {
    groups.into_iter().filter(|(_, m)| !m.is_empty()).collect()
}

/// Run both passes over the pending recipes.
pub fn resolve_tags(pending: &IndexMap<ItemId, PendingRecipe>) -> TagResolution {
    let groups = discover_groups(pending);

    let mut fallbacks = 0;
    let recipes = pending
        .iter()
        .map(|(output, recipe)| {
            let (resolved, n) = resolve_recipe(recipe, &groups);
            fallbacks += n;
            (output.clone(), resolved)
        })
        .collect();

    let groups = finalize_groups(groups);
    info!(
        groups = groups.len(),
        fallbacks, "resolved tag references"
    );

    TagResolution {
        recipes,
        groups,
        fallbacks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftbook_core::test_utils::item_list;
    use proptest::prelude::*;

    fn pending(pattern: &[&str], key: Vec<(char, Ingredient)>) -> PendingRecipe {
        PendingRecipe {
            shaped: true,
            pattern: pattern.iter().map(|r| r.to_string()).collect(),
            key: key.into_iter().collect(),
            count: 1,
        }
    }

    fn items(ids: &[&str]) -> Ingredient {
        Ingredient::Items(item_list(ids))
    }

    fn fixture() -> IndexMap<ItemId, PendingRecipe> {
        let mut recipes = IndexMap::new();
        recipes.insert(
            ItemId::from("oak_planks"),
            pending(&["#"], vec![('#', items(&["oak_log", "stripped_oak_log", "oak_wood"]))]),
        );
        recipes.insert(
            ItemId::from("stick"),
            pending(&["#", "#"], vec![('#', Ingredient::tag("planks"))]),
        );
        recipes.insert(
            ItemId::from("crimson_planks"),
            pending(&["#"], vec![('#', items(&["crimson_stem"]))]),
        );
        recipes.insert(
            ItemId::from("white_bed"),
            pending(
                &["WWW", "PPP"],
                vec![('W', Ingredient::tag("wool")), ('P', Ingredient::tag("planks"))],
            ),
        );
        recipes.insert(
            ItemId::from("birch_planks"),
            pending(&["#"], vec![('#', items(&["birch_log", "oak_log"]))]),
        );
        recipes
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    #[test]
    fn discovers_planks_and_logs_in_first_seen_order() {
        let groups = discover_groups(&fixture());
        assert_eq!(
            groups[PLANKS],
            item_list(&["oak_planks", "crimson_planks", "birch_planks"])
        );
        assert_eq!(
            groups[LOGS],
            item_list(&["oak_log", "stripped_oak_log", "crimson_stem", "birch_log"])
        );
    }

    #[test]
    fn discovery_ignores_non_plank_outputs() {
        let mut recipes = IndexMap::new();
        recipes.insert(
            ItemId::from("campfire"),
            pending(&["#"], vec![('#', items(&["oak_log"]))]),
        );
        let groups = discover_groups(&recipes);
        assert!(groups[PLANKS].is_empty());
        assert!(groups[LOGS].is_empty());
        assert!(finalize_groups(groups).is_empty());
    }

    // -----------------------------------------------------------------------
    // Substitution
    // -----------------------------------------------------------------------

    #[test]
    fn tags_become_group_members() {
        let resolution = resolve_tags(&fixture());
        let stick = &resolution.recipes["stick"];
        assert_eq!(
            stick.key[&'#'],
            item_list(&["oak_planks", "crimson_planks", "birch_planks"])
        );
    }

    #[test]
    fn unknown_tag_falls_back_to_its_name() {
        let resolution = resolve_tags(&fixture());
        let bed = &resolution.recipes["white_bed"];
        assert_eq!(bed.key[&'W'], item_list(&["wool"]));
        assert_eq!(bed.key[&'P'].len(), 3);
        assert_eq!(resolution.fallbacks, 1);
    }

    #[test]
    fn empty_group_falls_back_to_its_name() {
        let mut recipes = IndexMap::new();
        recipes.insert(
            ItemId::from("stick"),
            pending(&["#", "#"], vec![('#', Ingredient::tag("planks"))]),
        );
        let resolution = resolve_tags(&recipes);
        assert_eq!(resolution.recipes["stick"].key[&'#'], item_list(&["planks"]));
        assert!(resolution.groups.is_empty());
        assert_eq!(resolution.fallbacks, 1);
    }

    #[test]
    fn order_and_metadata_survive() {
        let resolution = resolve_tags(&fixture());
        let order: Vec<&str> = resolution.recipes.keys().map(ItemId::as_str).collect();
        assert_eq!(
            order,
            ["oak_planks", "stick", "crimson_planks", "white_bed", "birch_planks"]
        );
        assert_eq!(resolution.recipes["white_bed"].pattern, ["WWW", "PPP"]);
        let groups: Vec<&str> = resolution.groups.keys().map(String::as_str).collect();
        assert_eq!(groups, [PLANKS, LOGS]);
    }

    #[test]
    fn resolving_resolved_recipes_is_a_no_op() {
        let first = resolve_tags(&fixture());
        let again: IndexMap<ItemId, PendingRecipe> = first
            .recipes
            .iter()
            .map(|(id, r)| (id.clone(), PendingRecipe::from(r)))
            .collect();
        let second = resolve_tags(&again);
        assert_eq!(second.recipes, first.recipes);
        assert_eq!(second.fallbacks, 0);
    }

    proptest! {
        /// No tag survives resolution and every key keeps its labels.
        #[test]
        fn resolution_is_total(tags in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
            let key: Vec<(char, Ingredient)> = tags
                .iter()
                .zip(['A', 'B', 'C', 'D', 'E', 'F'])
                .map(|(t, l)| (l, Ingredient::tag(t.as_str())))
                .collect();
            let mut recipes = fixture();
            recipes.insert(ItemId::from("generated"), pending(&["A"], key.clone()));

            let resolution = resolve_tags(&recipes);
            let generated = &resolution.recipes["generated"];
            prop_assert_eq!(generated.key.len(), key.len());
            prop_assert!(generated.key.values().all(|items| !items.is_empty()));

            let again: IndexMap<ItemId, PendingRecipe> = resolution
                .recipes
                .iter()
                .map(|(id, r)| (id.clone(), PendingRecipe::from(r)))
                .collect();
            prop_assert_eq!(resolve_tags(&again).recipes, resolution.recipes);
        }
    }
}
