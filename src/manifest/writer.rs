//! Manifest output

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ManifestError;
use crate::models::Manifest;

/// Write `manifest` to `path` as 2-space indented JSON
///
/// The JSON is encoded in memory and written to a sibling temp file that is
/// then renamed over `path`, so a failed run leaves any existing manifest
/// untouched.
pub fn write(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let bytes = encode(manifest)?;
    let tmp_path = temp_path_for(path);

    let write_err = |source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&tmp_path, &bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), patches = manifest.len(), "wrote manifest");
    Ok(())
}

/// Pretty JSON (2-space indent) with a trailing newline
pub fn encode(manifest: &Manifest) -> Result<Vec<u8>, ManifestError> {
    let mut bytes = serde_json::to_vec_pretty(manifest)?;
    bytes.push(b'\n');
    Ok(bytes)
}

// `out/manifest.json` -> `out/.manifest.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
