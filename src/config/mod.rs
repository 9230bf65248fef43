//! Configuration for a manifest run
//!
//! Holds the input/output locations and the file-name conventions shared by
//! the builder and the CLI.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix identifying a patch file (case-sensitive)
pub const PATCH_EXTENSION: &str = ".thrl6p";

/// Suffix replacing `PATCH_EXTENSION` to locate the sidecar metadata file
pub const METADATA_SUFFIX: &str = ".meta.json";

pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_DESCRIPTION: &str = "NA";

pub const DEFAULT_PATCHES_PATH: &str = "./files";
pub const DEFAULT_MANIFEST_PATH: &str = "./manifest.json";

/// Where to read patches from and where to write the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub patches_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl BuildConfig {
    pub fn new(patches_path: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            patches_path: patches_path.into(),
            manifest_path: manifest_path.into(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATCHES_PATH, DEFAULT_MANIFEST_PATH)
    }
}

/// Returns true if `file_name` names a patch file
pub fn is_patch_file_name(file_name: &str) -> bool {
    file_name.ends_with(PATCH_EXTENSION)
}

/// Sidecar path for a patch: `dir/lead.thrl6p` -> `dir/lead.meta.json`
///
/// Only the file name is rewritten, so the parent directory is kept byte for
/// byte. Names that don't carry the patch extension get the suffix appended
/// as-is.
pub fn metadata_path_for(patch_path: &Path) -> PathBuf {
    let file_name = patch_path.file_name().unwrap_or_default();
    let mut sidecar = match file_name.to_str().and_then(|n| n.strip_suffix(PATCH_EXTENSION)) {
        Some(base) => OsString::from(base),
        None => file_name.to_os_string(),
    };
    sidecar.push(METADATA_SUFFIX);
    patch_path.with_file_name(sidecar)
}
