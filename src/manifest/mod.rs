//! Manifest builder
//!
//! Scans a patch directory, merges sidecar metadata, and writes the catalog.
//! Errors come in two tiers: `ManifestError` aborts the run, while
//! `PatchError` and `MetadataError` only affect a single entry.

use std::path::PathBuf;

pub mod builder;
pub mod writer;

pub use builder::{build, scan, DefaultedMetadata, ScanReport, SkippedPatch};
pub use writer::write;

/// Fatal errors that abort a manifest run
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read patch directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            ManifestError::DirectoryRead { .. } | ManifestError::Write { .. } => 3,
            ManifestError::Serialize(_) => 1,
        }
    }
}

/// Why a patch file was left out of the manifest
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("file name is not valid UTF-8")]
    NonUtf8Name,

    #[error("failed to open file: {0}")]
    Open(#[source] std::io::Error),

    #[error("invalid patch data: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Why a patch fell back to default metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
