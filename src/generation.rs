//! Numbered backup naming and generation counting.
//!
//! Generation `n` of `file` is named `file.~n~` and lives in the same directory.
//! Only the unbroken run `1..=k` counts: if `file.~3~` is missing, `file.~4~` and
//! anything above it are invisible to [`count_backups`].

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result, probe};

/// Returns the backup suffix for generation `n`, e.g. `.~4~`.
pub fn suffix(n: usize) -> String {
    format!(".~{n}~")
}

/// Returns the path of generation `n` of `path`: the path itself with [`suffix`] appended.
pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix(n));
    PathBuf::from(s)
}

/// Inverse of [`suffix`]: `.~12~` gives 12.
///
/// Only the canonical form is accepted: no leading zeros, generation at least 1.
pub fn parse_suffix(s: &str) -> Option<usize> {
    let digits = s.strip_prefix(".~")?.strip_suffix('~')?;
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Splits a file name such as `notes.txt.~12~` into `("notes.txt", 12)`.
///
/// Returns `None` if the name does not end in a canonical backup suffix
/// or has nothing before it.
pub fn parse_generation(file_name: &str) -> Option<(&str, usize)> {
    let (base, tail) = file_name.split_at(file_name.rfind(".~")?);
    if base.is_empty() {
        return None;
    }
    Some((base, parse_suffix(tail)?))
}

/// Returns the number of consecutive existing backups of `path`.
///
/// The containing directory is read once, so the cost does not grow with the
/// number of generations probed.
///
/// # Errors
/// * [`Error::NotRegularFile`] if `path` is a directory or another non-regular entry.
/// * [`Error::Io`] if `path` cannot be stat'ed (including "not found") or its
///   directory cannot be read.
pub fn count_backups(path: &Path) -> Result<usize> {
    if !probe::is_regular_file(path)? {
        return Err(Error::NotRegularFile(path.to_path_buf()));
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::NotRegularFile(path.to_path_buf()))?;

    let mut names = HashSet::new();
    for entry in fs::read_dir(parent_dir(path))? {
        names.insert(entry?.file_name());
    }

    let mut n = 1;
    while names.contains(&with_suffix(file_name, n)) {
        n += 1;
    }
    log::debug!("{} has {} numbered backup(s)", path.display(), n - 1);
    Ok(n - 1)
}

/// Returns the paths of all consecutive existing backups of `path`, oldest first.
///
/// # Errors
/// Same as [`count_backups`].
pub fn list_backups(path: &Path) -> Result<Vec<PathBuf>> {
    let count = count_backups(path)?;
    Ok((1..=count).map(|n| backup_path(path, n)).collect())
}

fn with_suffix(file_name: &OsStr, n: usize) -> OsString {
    let mut name = file_name.to_os_string();
    name.push(suffix(n));
    name
}

/// A bare file name such as `notes.txt` has an empty parent; it lives in `.`.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
