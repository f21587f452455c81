//! Craftbook Core -- the crafting dataset model and grid placement.
//!
//! This crate holds the types every stage of the recipe pipeline shares and
//! the read-only queries presentation code runs against a generated dataset.
//!
//! # Data flow
//!
//! 1. **Ingest** -- raw definitions become [`recipe::PendingRecipe`]s in a
//!    [`dataset::DatasetBuilder`] (see `craftbook-data`).
//! 2. **Resolve** -- symbolic tag references are replaced by concrete item
//!    lists, producing [`recipe::Recipe`]s.
//! 3. **Emit** -- the finished [`dataset::Dataset`] is written to disk.
//! 4. **Place** -- [`dataset::Dataset::crafting_table_state`] maps a recipe
//!    onto the 3x3 grid for display.
//!
//! # Key Types
//!
//! - [`id::ItemId`] -- canonical, namespace-stripped item identifier.
//! - [`recipe::Ingredient`] -- concrete alternatives or a tag reference.
//! - [`dataset::Dataset`] -- items, item groups, recipes and item details,
//!   all in discovery order.
//! - [`grid::CraftingGrid`] -- nine slots of optional item details.

pub mod dataset;
pub mod grid;
pub mod id;
pub mod item;
pub mod recipe;
pub mod serialize;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use dataset::{Dataset, DatasetBuilder, ItemGroups};
pub use grid::CraftingGrid;
pub use id::ItemId;
pub use item::ItemDetails;
pub use recipe::{Ingredient, PendingRecipe, Recipe};
