//! Directory scan producing a `Manifest`

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use super::{ManifestError, MetadataError, PatchError};
use crate::config::{is_patch_file_name, metadata_path_for};
use crate::models::{Manifest, Metadata, Patch, PatchFile};

/// A patch file that was excluded from the manifest
#[derive(Debug)]
pub struct SkippedPatch {
    pub filename: String,
    pub reason: PatchError,
}

/// A patch that was included with default metadata
#[derive(Debug)]
pub struct DefaultedMetadata {
    pub filename: String,
    pub reason: MetadataError,
}

/// Outcome of a scan: the manifest plus every recoverable problem hit on the way
#[derive(Debug, Default)]
pub struct ScanReport {
    pub manifest: Manifest,
    pub skipped: Vec<SkippedPatch>,
    pub defaulted: Vec<DefaultedMetadata>,
}

/// Build the manifest for every valid patch in `patches_dir`
pub fn build(patches_dir: &Path) -> Result<Manifest, ManifestError> {
    Ok(scan(patches_dir)?.manifest)
}

/// Scan `patches_dir` and collect patches in file-name order
///
/// Only a directory that can't be listed is fatal. Unreadable or malformed
/// patch files are skipped; missing or malformed sidecars fall back to
/// default metadata.
pub fn scan(patches_dir: &Path) -> Result<ScanReport, ManifestError> {
    let mut report = ScanReport::default();

    for file_name in list_entries(patches_dir)? {
        let Some(name) = file_name.to_str() else {
            if is_patch_file_name(&file_name.to_string_lossy()) {
                let filename = file_name.to_string_lossy().into_owned();
                let reason = PatchError::NonUtf8Name;
                warn!(file = %filename, error = %reason, "invalid patch name, skipping");
                report.skipped.push(SkippedPatch { filename, reason });
            }
            continue;
        };

        if !is_patch_file_name(name) {
            continue;
        }

        let patch_path = patches_dir.join(name);
        let patch_file = match read_patch_file(&patch_path) {
            Ok(file) => file,
            Err(e) => {
                warn!(file = %name, error = %e, "invalid patch data, skipping");
                report.skipped.push(SkippedPatch {
                    filename: name.to_string(),
                    reason: e,
                });
                continue;
            }
        };

        let metadata = match read_metadata(&patch_path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(file = %name, error = %e, "invalid metadata, using defaults");
                report.defaulted.push(DefaultedMetadata {
                    filename: name.to_string(),
                    reason: e,
                });
                Metadata::default()
            }
        };

        let patch = Patch::new(name.to_string(), patch_file, metadata);
        debug!(file = %patch.filename, name = %patch.name, "added patch");
        report.manifest.push(patch);
    }

    Ok(report)
}

/// Entry names in `dir`, sorted so every run sees the same order
fn list_entries(dir: &Path) -> Result<Vec<OsString>, ManifestError> {
    let read_dir_err = |source| ManifestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = fs::read_dir(dir)
        .map_err(read_dir_err)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    names.sort();
    Ok(names)
}

/// Open and decode a `.thrl6p` file
pub fn read_patch_file(path: &Path) -> Result<PatchFile, PatchError> {
    let file = File::open(path).map_err(PatchError::Open)?;
    serde_json::from_reader(BufReader::new(file)).map_err(PatchError::Decode)
}

/// Open and decode the sidecar metadata next to `patch_path`
pub fn read_metadata(patch_path: &Path) -> Result<Metadata, MetadataError> {
    let path = metadata_path_for(patch_path);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(MetadataError::Open { path, source }),
    };
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| MetadataError::Decode { path, source })
}
