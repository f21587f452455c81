//! Recipe ingestion: raw definition files into a [`DatasetBuilder`].
//!
//! Each definition passes a fixed sequence of gates: crafting surface,
//! required fields, grid validation, ingredient registration, the exclusion
//! list, result registration and finally insertion keyed by output. A
//! definition that fails a gate is skipped and counted; nothing here aborts
//! the run except an unreadable source directory.

use craftbook_core::dataset::DatasetBuilder;
use craftbook_core::id::{ItemId, normalize, strip_namespace};
use craftbook_core::recipe::{Ingredient, PendingRecipe};
use craftbook_core::validation::{RecipeError, validate_pattern};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::IngestConfig;
use crate::loader::{DataLoadError, deserialize_file, recipe_files};
use crate::schema::{IngredientData, RawRef, RecipeFile, ResultData, ShapedData, ShapelessData};
use crate::shapeless::synthesize;

/// Tallies for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub files: usize,
    pub parsed: usize,
    pub wrong_surface: usize,
    /// Furnace, brewing, smithing and other non-crafting recipes.
    pub other_kind: usize,
    pub malformed: usize,
    pub excluded: usize,
    /// Parsed recipes that replaced an earlier recipe for the same output.
    pub overwritten: usize,
}

impl IngestReport {
    /// Count one definition's outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Parsed { overwritten, .. } => {
                self.parsed += 1;
                if *overwritten {
                    self.overwritten += 1;
                }
            }
            Outcome::WrongSurface => self.wrong_surface += 1,
            Outcome::OtherKind => self.other_kind += 1,
            Outcome::Excluded(_) => self.excluded += 1,
            Outcome::Malformed(_) => self.malformed += 1,
        }
    }

    /// Definitions that did not make it into the recipe table.
    pub fn skipped(&self) -> usize {
        self.wrong_surface + self.other_kind + self.malformed + self.excluded
    }
}

/// Why a crafting-table definition was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("key label '{0}' is not a single character")]
    BadLabel(String),
    #[error(transparent)]
    Invalid(#[from] RecipeError),
}

/// What happened to one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Parsed { output: ItemId, overwritten: bool },
    WrongSurface,
    OtherKind,
    Excluded(ItemId),
    Malformed(RejectReason),
}

/// A definition that passed validation, before anything is registered.
struct Candidate {
    output: ItemId,
    recipe: PendingRecipe,
}

// ===========================================================================
// Conversion
// ===========================================================================

fn convert_ingredient(data: &IngredientData, namespace: &str) -> Option<Ingredient> {
    match data.reference()? {
        RawRef::Item(raw) => Some(Ingredient::Items(vec![normalize(raw, namespace)])),
        RawRef::Tag(raw) => Some(Ingredient::Tag(strip_namespace(raw, namespace).to_string())),
    }
}

fn convert_result(
    result: Option<&ResultData>,
    namespace: &str,
) -> Result<(ItemId, u32), RejectReason> {
    let (raw, count) = result
        .and_then(ResultData::primary)
        .ok_or(RejectReason::MissingField("result"))?;
    Ok((normalize(raw, namespace), count))
}

fn convert_shaped(data: &ShapedData, namespace: &str) -> Result<Candidate, RejectReason> {
    let pattern = data
        .pattern
        .clone()
        .ok_or(RejectReason::MissingField("pattern"))?;
    let raw_key = data.key.as_ref().ok_or(RejectReason::MissingField("key"))?;
    let (output, count) = convert_result(data.result.as_ref(), namespace)?;

    let mut key = IndexMap::new();
    for (label, ingredient) in raw_key {
        let mut chars = label.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(RejectReason::BadLabel(label.clone()));
        };
        // Descriptors naming neither an item nor a tag are dropped; the
        // label then fails validation if the pattern uses it.
        if let Some(converted) = convert_ingredient(ingredient, namespace) {
            key.insert(ch, converted);
        }
    }

    validate_pattern(&pattern, &key)?;

    Ok(Candidate {
        output,
        recipe: PendingRecipe {
            shaped: true,
            pattern,
            key,
            count,
        },
    })
}

fn convert_shapeless(data: &ShapelessData, namespace: &str) -> Result<Candidate, RejectReason> {
    let raw_ingredients = data
        .ingredients
        .as_ref()
        .ok_or(RejectReason::MissingField("ingredients"))?;
    let (output, count) = convert_result(data.result.as_ref(), namespace)?;

    let ingredients = raw_ingredients
        .iter()
        .filter_map(|i| convert_ingredient(i, namespace))
        .collect();
    let synth = synthesize(ingredients)?;

    Ok(Candidate {
        output,
        recipe: PendingRecipe {
            shaped: false,
            pattern: synth.pattern,
            key: synth.key,
            count,
        },
    })
}

// ===========================================================================
// Ingestion
// ===========================================================================

/// Run one parsed definition through every gate, updating `builder`.
pub fn ingest_definition(
    file: &RecipeFile,
    config: &IngestConfig,
    builder: &mut DatasetBuilder,
) -> Outcome {
    let namespace = config.namespace.as_str();

    let converted = if let Some(shaped) = &file.shaped {
        if !shaped.tags.contains(&config.surface) {
            return Outcome::WrongSurface;
        }
        convert_shaped(shaped, namespace)
    } else if let Some(shapeless) = &file.shapeless {
        if !shapeless.tags.contains(&config.surface) {
            return Outcome::WrongSurface;
        }
        convert_shapeless(shapeless, namespace)
    } else {
        return Outcome::OtherKind;
    };

    let Candidate { output, recipe } = match converted {
        Ok(candidate) => candidate,
        Err(reason) => return Outcome::Malformed(reason),
    };

    // Ingredients count as known items even when the output is excluded.
    for items in recipe.key.values().filter_map(Ingredient::items) {
        for id in items {
            builder.register_item(id.clone());
        }
    }

    if config.excluded_items.iter().any(|e| e == output.as_str()) {
        return Outcome::Excluded(output);
    }

    builder.register_item(output.clone());
    let overwritten = builder.insert_recipe(output.clone(), recipe).is_some();
    if overwritten {
        warn!(output = %output, "recipe replaces an earlier recipe for the same item");
    }
    Outcome::Parsed {
        output,
        overwritten,
    }
}

/// Ingest every `*.json` definition in `dir`, in file-name order.
///
/// Unreadable or unparsable files are counted as malformed. The only error
/// returned is failing to list `dir` itself.
pub fn ingest_directory(
    dir: &Path,
    config: &IngestConfig,
    builder: &mut DatasetBuilder,
) -> Result<IngestReport, DataLoadError> {
    let files = recipe_files(dir)?;
    let mut report = IngestReport {
        files: files.len(),
        ..IngestReport::default()
    };

    for path in &files {
        let outcome = match deserialize_file::<RecipeFile>(path) {
            Ok(file) => ingest_definition(&file, config, builder),
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping unreadable definition");
                report.malformed += 1;
                continue;
            }
        };
        match &outcome {
            Outcome::Malformed(reason) => {
                debug!(file = %path.display(), %reason, "skipping malformed definition");
            }
            Outcome::Excluded(output) => {
                debug!(file = %path.display(), output = %output, "skipping excluded item");
            }
            _ => {}
        }
        report.record(&outcome);
    }

    info!(
        files = report.files,
        parsed = report.parsed,
        wrong_surface = report.wrong_surface,
        other_kind = report.other_kind,
        malformed = report.malformed,
        excluded = report.excluded,
        items = builder.item_count(),
        "ingested recipe definitions"
    );
    Ok(report)
}
