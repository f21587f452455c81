//! Serde structs for raw recipe definition files.
//!
//! Mirrors the on-disk layout of the behavior-pack recipe JSON. Every field
//! the ingestor treats as required is still optional here, so a definition
//! missing one deserializes fine and is counted as malformed instead of
//! failing the parse.

use indexmap::IndexMap;
use serde::Deserialize;

/// One recipe definition file. At most one body is expected; a file with
/// neither known body is some other kind of recipe (furnace, brewing...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeFile {
    #[serde(rename = "minecraft:recipe_shaped")]
    pub shaped: Option<ShapedData>,
    #[serde(rename = "minecraft:recipe_shapeless")]
    pub shapeless: Option<ShapelessData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionData {
    pub identifier: Option<String>,
}

/// Body of a shaped recipe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShapedData {
    #[serde(default)]
    pub description: Option<DescriptionData>,
    /// Crafting surfaces the recipe applies to.
    #[serde(default)]
    pub tags: Vec<String>,
    pub pattern: Option<Vec<String>>,
    pub key: Option<IndexMap<String, IngredientData>>,
    pub result: Option<ResultData>,
}

/// Body of a shapeless recipe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShapelessData {
    #[serde(default)]
    pub description: Option<DescriptionData>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ingredients: Option<Vec<IngredientData>>,
    pub result: Option<ResultData>,
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

/// An ingredient descriptor: either a bare identifier string or an object
/// naming an `item` or a `tag`. Other descriptor fields (`data`, `count`)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientData {
    Name(String),
    Descriptor {
        #[serde(default)]
        item: Option<String>,
        #[serde(default)]
        tag: Option<String>,
    },
}

/// What an ingredient descriptor refers to, still namespaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawRef<'a> {
    Item(&'a str),
    Tag(&'a str),
}

impl IngredientData {
    /// The referenced item or tag. A tag wins when both are present.
    pub fn reference(&self) -> Option<RawRef<'_>> {
        match self {
            IngredientData::Name(name) => Some(RawRef::Item(name)),
            IngredientData::Descriptor { tag: Some(tag), .. } => Some(RawRef::Tag(tag)),
            IngredientData::Descriptor {
                item: Some(item), ..
            } => Some(RawRef::Item(item)),
            IngredientData::Descriptor { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A recipe result: a bare identifier, a stack object, or a list of stacks
/// of which only the first is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultData {
    Name(String),
    Stack {
        item: String,
        #[serde(default)]
        count: Option<u32>,
    },
    Many(Vec<ResultData>),
}

impl ResultData {
    /// The (namespaced) output identifier and stack size, defaulting the
    /// count to 1.
    pub fn primary(&self) -> Option<(&str, u32)> {
        match self {
            ResultData::Name(name) => Some((name.as_str(), 1)),
            ResultData::Stack { item, count } => Some((item.as_str(), count.unwrap_or(1))),
            ResultData::Many(list) => list.first().and_then(ResultData::primary),
        }
    }
}
