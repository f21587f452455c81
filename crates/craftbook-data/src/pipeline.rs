//! The full generation pipeline: ingest, resolve, describe, check, emit.

use craftbook_core::dataset::{Dataset, DatasetBuilder};
use std::path::PathBuf;
use tracing::info;

use crate::config::PipelineConfig;
use crate::emit::emit_dataset;
use crate::ingest::{IngestReport, ingest_directory};
use crate::loader::DataLoadError;
use crate::tags::resolve_tags;
use crate::textures::{FsTextureResolver, TextureResolver, build_item_details};

/// Counters gathered across every stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub ingest: IngestReport,
    pub groups: usize,
    pub tag_fallbacks: usize,
    pub textures_copied: usize,
    /// Files written by the emitter; empty until [`generate`] emits.
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub dataset: Dataset,
    pub report: BuildReport,
}

/// Build the dataset from `config.source.recipes_dir` without writing it.
pub fn build_dataset<R: TextureResolver>(
    config: &PipelineConfig,
    resolver: &mut R,
) -> Result<BuildOutput, DataLoadError> {
    let mut builder = DatasetBuilder::new();
    let ingest = ingest_directory(&config.source.recipes_dir, &config.ingest, &mut builder)?;
    assemble(builder, ingest, resolver)
}

/// Resolve tags and describe items for everything ingested into `builder`,
/// then check the result before handing it out.
fn assemble<R: TextureResolver>(
    builder: DatasetBuilder,
    ingest: IngestReport,
    resolver: &mut R,
) -> Result<BuildOutput, DataLoadError> {
    let (items, pending) = builder.into_parts();
    let resolution = resolve_tags(&pending);
    let item_details = build_item_details(&items, resolver);

    let report = BuildReport {
        ingest,
        groups: resolution.groups.len(),
        tag_fallbacks: resolution.fallbacks,
        textures_copied: resolver.copied(),
        written: Vec::new(),
    };
    let dataset = Dataset {
        items,
        item_groups: resolution.groups,
        recipes: resolution.recipes,
        item_details,
    };
    dataset.validate()?;
    Ok(BuildOutput { dataset, report })
}

/// Build the dataset, copying textures from the configured resource pack,
/// and emit it to `config.output.dir`.
pub fn generate(config: &PipelineConfig) -> Result<BuildOutput, DataLoadError> {
    let mut resolver = FsTextureResolver::new(
        &config.source.block_textures_dir,
        &config.source.item_textures_dir,
        &config.output.public_dir,
        config.output.copy_textures,
    );
    let mut output = build_dataset(config, &mut resolver)?;
    output.report.written = emit_dataset(&output.dataset, &config.output.dir, config.output.format)?;

    info!(
        recipes = output.dataset.recipes.len(),
        items = output.dataset.items.len(),
        groups = output.report.groups,
        textures = output.report.textures_copied,
        "generation complete"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::TextureKind;
    use craftbook_core::dataset::DatasetError;
    use craftbook_core::id::ItemId;
    use craftbook_core::item::PLACEHOLDER_ICON;
    use craftbook_core::recipe::{Ingredient, PendingRecipe};
    use std::fs;
    use std::path::Path;

    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "craftbook_pipeline_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("recipes")).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    struct NoTextures;

    impl TextureResolver for NoTextures {
        fn resolve(&mut self, _name: &str, _kind: TextureKind) -> Option<String> {
            None
        }
    }

    fn write_fixtures(dir: &Path) {
        let recipes = dir.join("recipes");
        fs::write(
            recipes.join("oak_planks.json"),
            r#"{ "minecraft:recipe_shapeless": {
                "tags": ["crafting_table"],
                "ingredients": [{ "item": "minecraft:oak_log" }],
                "result": { "item": "minecraft:oak_planks", "count": 4 }
            } }"#,
        )
        .unwrap();
        fs::write(
            recipes.join("stick.json"),
            r##"{ "minecraft:recipe_shaped": {
                "tags": ["crafting_table"],
                "pattern": ["#", "#"],
                "key": { "#": { "tag": "minecraft:planks" } },
                "result": { "item": "minecraft:stick", "count": 4 }
            } }"##,
        )
        .unwrap();
    }

    fn config_for(dir: &Path) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.source.recipes_dir = dir.join("recipes");
        config.source.block_textures_dir = dir.join("blocks");
        config.source.item_textures_dir = dir.join("items");
        config.output.dir = dir.join("out");
        config.output.public_dir = dir.join("public");
        config
    }

    #[test]
    fn build_resolves_tags_and_details() {
        let dir = make_test_dir("build");
        write_fixtures(&dir);

        let output = build_dataset(&config_for(&dir), &mut NoTextures).unwrap();
        let dataset = &output.dataset;

        assert_eq!(output.report.ingest.parsed, 2);
        assert_eq!(output.report.groups, 2);
        assert_eq!(
            dataset.recipe("stick").unwrap().key[&'#'],
            [ItemId::from("oak_planks")]
        );
        assert_eq!(dataset.group("logs").unwrap(), [ItemId::from("oak_log")]);
        assert_eq!(dataset.item_details.len(), dataset.items.len());
        assert_eq!(dataset.details("stick").unwrap().icon, [PLACEHOLDER_ICON]);
        assert!(dataset.validate().is_ok());

        cleanup(&dir);
    }

    #[test]
    fn generate_writes_tables() {
        let dir = make_test_dir("generate");
        write_fixtures(&dir);
        fs::create_dir_all(dir.join("items")).unwrap();
        fs::write(dir.join("items/stick.png"), b"png").unwrap();

        let output = generate(&config_for(&dir)).unwrap();
        assert_eq!(output.report.written.len(), 4);
        assert!(dir.join("out/recipes.json").is_file());
        assert!(dir.join("public/textures/items/stick.png").is_file());
        assert!(output.report.textures_copied >= 1);

        cleanup(&dir);
    }

    #[test]
    fn inconsistent_dataset_is_an_error() {
        let mut builder = DatasetBuilder::new();
        builder.insert_recipe(
            ItemId::from("thing"),
            PendingRecipe {
                shaped: true,
                pattern: vec!["#".into(), "###".into()],
                key: [('#', Ingredient::item("stick"))].into_iter().collect(),
                count: 1,
            },
        );
        let result = assemble(builder, IngestReport::default(), &mut NoTextures);
        assert!(matches!(
            result,
            Err(DataLoadError::Inconsistent(DatasetError::InvalidRecipe { ref recipe, .. }))
                if recipe.as_str() == "thing"
        ));
    }

    #[test]
    fn missing_recipe_dir_fails() {
        let dir = make_test_dir("missing");
        let mut config = config_for(&dir);
        config.source.recipes_dir = dir.join("nope");
        assert!(matches!(
            build_dataset(&config, &mut NoTextures),
            Err(DataLoadError::SourceDir { .. })
        ));
        cleanup(&dir);
    }
}
