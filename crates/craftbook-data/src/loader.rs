//! File discovery, format detection and deserialization.
//!
//! Provides the helpers the pipeline uses to enumerate recipe definitions,
//! read configuration files and load emitted dataset tables back.

use craftbook_core::dataset::DatasetError;
use craftbook_core::serialize::DeserializeError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or writing data files.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The recipe source directory could not be enumerated.
    #[error("cannot read source directory {dir}: {source}")]
    SourceDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A serialization error occurred while writing output.
    #[error("cannot serialize {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    /// A binary dataset snapshot was rejected.
    #[error("invalid dataset snapshot: {0}")]
    Snapshot(#[from] DeserializeError),

    /// The assembled dataset broke a consistency check.
    #[error("generated dataset is inconsistent: {0}")]
    Inconsistent(#[from] DatasetError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = &found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// List the `*.json` recipe definitions in `dir`, sorted by file name so
/// every run processes them in the same order.
///
/// Failing to enumerate the directory is the one fatal ingestion error.
pub fn recipe_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    let source_err = |source| DataLoadError::SourceDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(source_err)? {
        let path = entry.map_err(source_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

/// Deserialize `content` in the given format; `path` is only used for
/// error reporting.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "craftbook_loader_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Named {
        name: String,
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_known_formats() {
        assert_eq!(detect_format(Path::new("items.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("craftbook.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("arrow.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("items.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("items")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = make_test_dir("find_found");
        fs::write(dir.join("recipes.json"), "{}").unwrap();

        let result = find_data_file(&dir, "recipes").unwrap();
        assert_eq!(result, Some(dir.join("recipes.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("items.ron"), "[]").unwrap();
        fs::write(dir.join("items.json"), "[]").unwrap();

        let result = find_data_file(&dir, "items");
        assert!(matches!(
            result,
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        let result = require_data_file(&dir, "items");
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "items"
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // recipe_files
    // -----------------------------------------------------------------------

    #[test]
    fn recipe_files_sorted_and_filtered() {
        let dir = make_test_dir("recipe_files");
        fs::write(dir.join("torch.json"), "{}").unwrap();
        fs::write(dir.join("arrow.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::create_dir(dir.join("nested.json")).unwrap();

        let files = recipe_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["arrow.json", "torch.json"]);

        cleanup(&dir);
    }

    #[test]
    fn recipe_files_missing_dir_is_fatal() {
        let dir = make_test_dir("recipe_files_missing").join("absent");
        assert!(matches!(
            recipe_files(&dir),
            Err(DataLoadError::SourceDir { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // deserialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_each_format() {
        let dir = make_test_dir("deser_formats");
        fs::write(dir.join("a.json"), r#"{"name": "stick"}"#).unwrap();
        fs::write(dir.join("b.ron"), r#"(name: "stick")"#).unwrap();
        fs::write(dir.join("c.toml"), r#"name = "stick""#).unwrap();

        for file in ["a.json", "b.ron", "c.toml"] {
            let named: Named = deserialize_file(&dir.join(file)).unwrap();
            assert_eq!(named.name, "stick");
        }

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = make_test_dir("deser_parse_err");
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Named, _> = deserialize_file(&path);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_missing_file_is_io() {
        let result: Result<Named, _> = deserialize_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "items".into(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("items"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::SourceDir {
            dir: PathBuf::from("/recipes"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = format!("{e}");
        assert!(msg.contains("/recipes"));
        assert!(msg.contains("gone"));

        let e = DataLoadError::Parse {
            file: PathBuf::from("bad.json"),
            detail: "syntax error".to_string(),
        };
        assert!(format!("{e}").contains("bad.json"));
        assert!(format!("{e}").contains("syntax error"));

        let e = DataLoadError::from(DatasetError::EmptyGroup {
            group: "wool".into(),
        });
        assert!(format!("{e}").contains("'wool'"));
    }
}
