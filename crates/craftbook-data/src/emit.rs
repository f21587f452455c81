//! Dataset emission and read-back.
//!
//! Text formats write one file per table so each can be imported on its
//! own; the binary format writes a single snapshot. Output carries no
//! timestamps or other run-dependent data, so identical input produces
//! byte-identical files.

use craftbook_core::dataset::Dataset;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::loader::{DataLoadError, deserialize_file, require_data_file};

pub const ITEMS_TABLE: &str = "items";
pub const ITEM_GROUPS_TABLE: &str = "item_groups";
pub const RECIPES_TABLE: &str = "recipes";
pub const ITEM_DETAILS_TABLE: &str = "item_details";

/// Table base names in emission order.
pub const TABLES: [&str; 4] = [ITEMS_TABLE, ITEM_GROUPS_TABLE, RECIPES_TABLE, ITEM_DETAILS_TABLE];

/// File name of the binary snapshot.
pub const SNAPSHOT_FILE: &str = "dataset.bin";

// ===========================================================================
// Writing
// ===========================================================================

fn encode_text<T: Serialize>(
    value: &T,
    format: OutputFormat,
    path: &Path,
) -> Result<String, DataLoadError> {
    let ser_err = |detail: String| DataLoadError::Serialize {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| ser_err(e.to_string())),
        OutputFormat::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| ser_err(e.to_string())),
        OutputFormat::Bitcode => Err(ser_err("bitcode is not a text format".to_string())),
    }
}

fn write_table<T: Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
    format: OutputFormat,
) -> Result<PathBuf, DataLoadError> {
    let path = dir.join(format!("{name}.{}", format.as_str()));
    let content = encode_text(value, format, &path)?;
    std::fs::write(&path, content)?;
    debug!(file = %path.display(), "wrote table");
    Ok(path)
}

/// Remove outputs of other formats so a later [`load_dataset`] does not see
/// conflicting files.
fn remove_stale(dir: &Path, format: OutputFormat) -> Result<(), DataLoadError> {
    let mut stale: Vec<PathBuf> = Vec::new();
    for other in [OutputFormat::Json, OutputFormat::Ron] {
        if other != format {
            stale.extend(TABLES.iter().map(|t| dir.join(format!("{t}.{}", other.as_str()))));
        }
    }
    if format != OutputFormat::Bitcode {
        stale.push(dir.join(SNAPSHOT_FILE));
    }

    for path in stale.into_iter().filter(|p| p.is_file()) {
        std::fs::remove_file(&path)?;
        debug!(file = %path.display(), "removed stale output");
    }
    Ok(())
}

/// Write `dataset` into `dir` and return the files written.
pub fn emit_dataset(
    dataset: &Dataset,
    dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, DataLoadError> {
    std::fs::create_dir_all(dir)?;
    remove_stale(dir, format)?;

    let written = match format {
        OutputFormat::Json | OutputFormat::Ron => vec![
            write_table(dir, ITEMS_TABLE, &dataset.items, format)?,
            write_table(dir, ITEM_GROUPS_TABLE, &dataset.item_groups, format)?,
            write_table(dir, RECIPES_TABLE, &dataset.recipes, format)?,
            write_table(dir, ITEM_DETAILS_TABLE, &dataset.item_details, format)?,
        ],
        OutputFormat::Bitcode => {
            let path = dir.join(SNAPSHOT_FILE);
            let bytes = dataset
                .to_snapshot()
                .map_err(|e| DataLoadError::Serialize {
                    file: path.clone(),
                    detail: e.to_string(),
                })?;
            std::fs::write(&path, bytes)?;
            vec![path]
        }
    };

    info!(
        dir = %dir.display(),
        format = format.as_str(),
        files = written.len(),
        items = dataset.items.len(),
        recipes = dataset.recipes.len(),
        "emitted dataset"
    );
    Ok(written)
}

// ===========================================================================
// Reading
// ===========================================================================

/// Load a dataset previously written by [`emit_dataset`].
///
/// A snapshot takes precedence when present. Otherwise each table is read
/// in whichever text format it was written in.
pub fn load_dataset(dir: &Path) -> Result<Dataset, DataLoadError> {
    let snapshot = dir.join(SNAPSHOT_FILE);
    if snapshot.is_file() {
        let bytes = std::fs::read(&snapshot)?;
        return Ok(Dataset::from_snapshot(&bytes)?);
    }

    Ok(Dataset {
        items: deserialize_file(&require_data_file(dir, ITEMS_TABLE)?)?,
        item_groups: deserialize_file(&require_data_file(dir, ITEM_GROUPS_TABLE)?)?,
        recipes: deserialize_file(&require_data_file(dir, RECIPES_TABLE)?)?,
        item_details: deserialize_file(&require_data_file(dir, ITEM_DETAILS_TABLE)?)?,
    })
}
