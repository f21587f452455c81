//! Binary dataset snapshots.
//!
//! Provides serialization via `bitcode` with a versioned header so a
//! presentation build can reject a dataset produced by an incompatible
//! generator before touching its payload.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a craftbook dataset snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0xC8AF_7B00;

/// Current format version. Increment when breaking the layout.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during serialization.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
    #[error("{0} recipes do not fit the snapshot header")]
    TooManyRecipes(usize),
}

/// Errors that can occur during deserialization.
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header stored in front of every dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
    pub recipe_count: u32,
}

impl SnapshotHeader {
    pub fn new(recipe_count: u32) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
            recipe_count,
        }
    }

    /// Validate the header. Returns `Ok(())` if valid.
    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DatasetSnapshot {
    header: SnapshotHeader,
    dataset: Dataset,
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

impl Dataset {
    /// Serialize the dataset into a versioned binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SerializeError> {
        let snapshot = DatasetSnapshot {
            header: SnapshotHeader::new(header_count(self.recipes.len())?),
            dataset: self.clone(),
        };
        bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    /// Decode a snapshot produced by [`Dataset::to_snapshot`].
    pub fn from_snapshot(data: &[u8]) -> Result<Self, DeserializeError> {
        let snapshot: DatasetSnapshot =
            bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
        snapshot.header.validate()?;
        Ok(snapshot.dataset)
    }
}

fn header_count(len: usize) -> Result<u32, SerializeError> {
    u32::try_from(len).map_err(|_| SerializeError::TooManyRecipes(len))
}
