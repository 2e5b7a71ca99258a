//! Existence and file type queries.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::Result;

/// Returns `true` if anything exists at `path`: a file, a directory, a device, etc.
///
/// Symbolic links are followed, so a dangling link reports `false`.
///
/// # Errors
/// Any stat failure other than "not found" (e.g. permission denied on a parent
/// directory) is propagated.
pub fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Returns `true` for regular files, and `false` for directories, devices and the like.
///
/// # Errors
/// Every stat failure is propagated, including "not found".
pub fn is_regular_file(path: &Path) -> Result<bool> {
    let metadata = fs::metadata(path)?;
    Ok(metadata.file_type().is_file())
}
