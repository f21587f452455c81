//! Pattern synthesis for shapeless recipes.
//!
//! Shapeless ingredients have no position of their own, so each one gets
//! the next label from [`LABELS`] in input order and the labels are laid out
//! in a roughly rectangular block. Identical ingredients are not merged.

use craftbook_core::recipe::Ingredient;
use craftbook_core::validation::{RecipeError, validate_ingredient_count};
use indexmap::IndexMap;

/// Slot labels handed out to shapeless ingredients, in order.
pub const LABELS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// A synthesized pattern and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedPattern {
    pub pattern: Vec<String>,
    pub key: IndexMap<char, Ingredient>,
}

/// Row lengths for `n` ingredients (1..=9): one row up to 3, two rows up
/// to 6 with the first taking `ceil(n/2)`, otherwise three rows of
/// `ceil(n/3)` with the last taking the remainder.
pub fn row_lengths(n: usize) -> Vec<usize> {
    match n {
        0..=3 => vec![n],
        4..=6 => {
            let first = n.div_ceil(2);
            vec![first, n - first]
        }
        _ => {
            let third = n.div_ceil(3);
            vec![third, third, n - 2 * third]
        }
    }
}

/// Assign labels to `ingredients` and build the pattern rows.
pub fn synthesize(ingredients: Vec<Ingredient>) -> Result<SynthesizedPattern, RecipeError> {
    validate_ingredient_count(ingredients.len())?;

    let key: IndexMap<char, Ingredient> = LABELS.iter().copied().zip(ingredients).collect();

    let mut pattern = Vec::new();
    let mut start = 0;
    for len in row_lengths(key.len()) {
        pattern.push(LABELS[start..start + len].iter().collect());
        start += len;
    }

    Ok(SynthesizedPattern { pattern, key })
}
