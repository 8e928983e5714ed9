//! Source file discovery

use crate::errors::IngestionError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Recursively collect every file under `root` whose path contains `marker`
///
/// Paths are returned sorted by file name within each directory so that a
/// rerun over an unchanged tree sees the same order. Any unreadable
/// directory aborts the scan.
pub fn locate_source_files(root: &Path, marker: &str) -> Result<Vec<PathBuf>, IngestionError> {
    let metadata = std::fs::metadata(root).map_err(|e| IngestionError::DirectoryAccess {
        path: root.display().to_string(),
        message: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(IngestionError::DirectoryAccess {
            path: root.display().to_string(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestionError::DirectoryAccess {
            path: e
                .path()
                .unwrap_or(root)
                .display()
                .to_string(),
            message: e.to_string(),
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        if entry.path().to_string_lossy().contains(marker) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), file_count = files.len(), "Source files located");

    Ok(files)
}
