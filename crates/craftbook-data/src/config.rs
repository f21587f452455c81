//! Pipeline configuration.
//!
//! Read from `craftbook.toml` (or any file [`crate::loader::detect_format`]
//! accepts). Every field has a default, so an empty or absent file yields
//! the stock layout of a bedrock-samples checkout next to the site sources.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::loader::{DataLoadError, deserialize_file};

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "craftbook.toml";

/// Output identifiers that never get a recipe entry: non-craftable,
/// education-edition or debug items.
pub const DEFAULT_EXCLUDED_ITEMS: &[&str] = &[
    "camera",
    "portfolio",
    "element",
    "compound",
    "sparkler",
    "balloon",
    "glow_stick",
    "ice_bomb",
    "super_fertilizer",
    "medicine",
    "rapid_fertilizer",
    "bleach",
    "heat_block",
];

// ===========================================================================
// Config types
// ===========================================================================

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub ingest: IngestConfig,
}

/// Where raw definitions and textures are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub recipes_dir: PathBuf,
    pub block_textures_dir: PathBuf,
    pub item_textures_dir: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            recipes_dir: PathBuf::from("bedrock-samples/behavior_pack/recipes"),
            block_textures_dir: PathBuf::from("bedrock-samples/resource_pack/textures/blocks"),
            item_textures_dir: PathBuf::from("bedrock-samples/resource_pack/textures/items"),
        }
    }
}

/// Encoding of the emitted dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Ron,
    Bitcode,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Ron => "ron",
            OutputFormat::Bitcode => "bitcode",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "ron" => Ok(OutputFormat::Ron),
            "bitcode" => Ok(OutputFormat::Bitcode),
            other => Err(format!("unknown output format '{other}' (json, ron, bitcode)")),
        }
    }
}

/// Where and how the dataset and textures are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// Root of the public asset tree; textures go to
    /// `<public_dir>/textures/{blocks,items}/`.
    pub public_dir: PathBuf,
    pub copy_textures: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/data/generated"),
            format: OutputFormat::Json,
            public_dir: PathBuf::from("public"),
            copy_textures: true,
        }
    }
}

/// Rules applied while ingesting definitions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Prefix stripped from every identifier.
    pub namespace: String,
    /// Crafting-surface tag a definition must carry.
    pub surface: String,
    /// Output identifiers whose recipes are dropped.
    pub excluded_items: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            namespace: craftbook_core::id::DEFAULT_NAMESPACE.to_string(),
            surface: "crafting_table".to_string(),
            excluded_items: DEFAULT_EXCLUDED_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
/// exists, or fall back to defaults.
///
/// An explicitly given path must exist.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, DataLoadError> {
    match path {
        Some(path) => deserialize_file(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                deserialize_file(default)
            } else {
                Ok(PipelineConfig::default())
            }
        }
    }
}
