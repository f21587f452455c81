//! Craftbook Data -- the build-time recipe pipeline.
//!
//! Reads behavior-pack recipe definitions, keeps the crafting-table ones,
//! resolves tag references, derives item details from the resource pack's
//! textures and writes the resulting [`craftbook_core::Dataset`] to disk.
//!
//! # Stages
//!
//! 1. [`ingest`] -- definitions into a [`craftbook_core::DatasetBuilder`],
//!    with [`shapeless`] laying out shapeless ingredients.
//! 2. [`tags`] -- group discovery and tag substitution.
//! 3. [`textures`] -- icon lookup and item details.
//! 4. [`emit`] -- JSON, RON or bitcode output, and reading it back.
//!
//! [`pipeline::generate`] runs all of them from a [`config::PipelineConfig`].

pub mod config;
pub mod emit;
pub mod ingest;
pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod shapeless;
pub mod tags;
pub mod textures;

pub use config::{OutputFormat, PipelineConfig, load_config};
pub use emit::{emit_dataset, load_dataset};
pub use ingest::IngestReport;
pub use loader::DataLoadError;
pub use pipeline::{BuildOutput, BuildReport, build_dataset, generate};
