#![no_main]
use craftbook_core::test_utils::sample_dataset;
use craftbook_core::{Recipe, grid::place};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any pattern text, valid or not, places without panicking and never
    // fills a slot whose label is absent from the key.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let dataset = sample_dataset();
    let mut recipe: Recipe = dataset.recipes["arrow"].clone();
    recipe.pattern = text.lines().map(str::to_string).collect();

    let grid = place(&recipe, &dataset.item_details);
    assert!(grid.filled_slots().len() <= text.chars().filter(|c| "#XY".contains(*c)).count());
});
