//! Dataset writer
//!
//! Serializes a dataset and replaces the target file in one step: the JSON
//! is written to a temporary file in the destination directory and renamed
//! over the target, so a failed run never leaves partial output.

use bibgraph_common::{AppError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize `value` as JSON and atomically write it to `path`
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<usize> {
    let payload = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    write_atomic(path, &payload)?;
    debug!(path = %path.display(), bytes = payload.len(), "Dataset written");

    Ok(payload.len())
}

/// Atomically replace `path` with `contents`
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| write_error(path, e))?;
    file.write_all(contents).map_err(|e| write_error(path, e))?;
    file.as_file().sync_all().map_err(|e| write_error(path, e))?;
    file.persist(path).map_err(|e| write_error(path, e.error))?;

    Ok(())
}

fn write_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
