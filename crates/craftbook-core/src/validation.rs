//! Structural validation for recipe patterns.
//!
//! Every recipe admitted into a dataset fits the 3x3 crafting grid and has a
//! key entry for each label its pattern uses.

use crate::recipe::is_slot_label;
use indexmap::IndexMap;

/// Side length of the crafting grid.
pub const GRID_SIZE: usize = 3;

/// Maximum number of ingredients a shapeless recipe may list.
pub const MAX_INGREDIENTS: usize = GRID_SIZE * GRID_SIZE;

/// Reasons a recipe definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("pattern has no rows")]
    EmptyPattern,
    #[error("pattern has {rows} rows, the grid has {GRID_SIZE}")]
    TooManyRows { rows: usize },
    #[error("pattern row {row} is {width} wide, the grid has {GRID_SIZE} columns")]
    RowTooWide { row: usize, width: usize },
    #[error("pattern row {row} is {width} wide and starts at column {offset}, past the grid edge")]
    RowOffGrid {
        row: usize,
        width: usize,
        offset: usize,
    },
    #[error("pattern label '{label}' has no key entry")]
    MissingKey { label: char },
    #[error("shapeless recipe has no ingredients")]
    NoIngredients,
    #[error("shapeless recipe has {count} ingredients, at most {MAX_INGREDIENTS} fit")]
    TooManyIngredients { count: usize },
}

/// Check that `pattern` fits the grid and every label used in it has an
/// entry in `key`.
///
/// Columns are centered on the first row's width, so a later row wider than
/// the first must still fit after that shift.
pub fn validate_pattern<V>(pattern: &[String], key: &IndexMap<char, V>) -> Result<(), RecipeError> {
    if pattern.is_empty() {
        return Err(RecipeError::EmptyPattern);
    }
    if pattern.len() > GRID_SIZE {
        return Err(RecipeError::TooManyRows {
            rows: pattern.len(),
        });
    }

    let first_width = pattern[0].chars().count();
    let offset = GRID_SIZE.saturating_sub(first_width) / 2;

    for (row, line) in pattern.iter().enumerate() {
        let width = line.chars().count();
        if width > GRID_SIZE {
            return Err(RecipeError::RowTooWide { row, width });
        }
        if width + offset > GRID_SIZE {
            return Err(RecipeError::RowOffGrid { row, width, offset });
        }
        if let Some(label) = line
            .chars()
            .filter(|c| is_slot_label(*c))
            .find(|c| !key.contains_key(c))
        {
            return Err(RecipeError::MissingKey { label });
        }
    }

    Ok(())
}

/// Check the ingredient count of a shapeless recipe.
pub fn validate_ingredient_count(count: usize) -> Result<(), RecipeError> {
    match count {
        0 => Err(RecipeError::NoIngredients),
        n if n > MAX_INGREDIENTS => Err(RecipeError::TooManyIngredients { count: n }),
        _ => Ok(()),
    }
}
