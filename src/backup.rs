//! Creation of the next numbered backup under a limit.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::generation::{backup_path, count_backups};
use crate::{Error, Result, copy};

/// How many numbered backups a file may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Backups are switched off; creating one is a no-op.
    Disabled,
    /// At most this many backups may coexist.
    AtMost(usize),
}

impl Limit {
    /// Returns `true` if a file with `count` backups may receive another one.
    pub fn allows(self, count: usize) -> bool {
        match self {
            Limit::Disabled => false,
            Limit::AtMost(max) => count < max,
        }
    }
}

/// Zero and negative limits disable backups.
impl From<i64> for Limit {
    fn from(limit: i64) -> Self {
        if limit <= 0 {
            Limit::Disabled
        } else {
            Limit::AtMost(usize::try_from(limit).unwrap_or(usize::MAX))
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Disabled => f.write_str("disabled"),
            Limit::AtMost(max) => write!(f, "{max}"),
        }
    }
}

/// Creates a numbered backup copy of `path` and returns the new file name.
///
/// The path is taken as is: it is not made absolute and symlinks are not resolved.
/// The copy is placed in the same directory as generation `n + 1`, where `n` is the
/// number of consecutive backups already present.
///
/// A `limit` of 0 or less does nothing at all and returns `Ok(None)`.
///
/// ```no_run
/// use std::path::Path;
///
/// // Creates /etc/ssh/ssh_config.~1~; a second call fails because the limit is reached.
/// numbak::create_numbered_backup(Path::new("/etc/ssh/ssh_config"), 1)?;
/// # Ok::<(), numbak::Error>(())
/// ```
///
/// Counting and copying are separate filesystem operations and the directory is not
/// locked. Two concurrent callers may pick the same generation and race on the same
/// destination file.
///
/// # Errors
/// * [`Error::LimitExceeded`] if `limit` backups already exist; nothing is created.
/// * Any error of [`count_backups`] or [`copy::copy_into`].
pub fn create_numbered_backup(path: &Path, limit: i64) -> Result<Option<PathBuf>> {
    let max = Limit::from(limit);
    if max == Limit::Disabled {
        return Ok(None);
    }

    let count = count_backups(path)?;
    if !max.allows(count) {
        return Err(Error::LimitExceeded { count, limit });
    }

    let next = backup_path(path, count + 1);
    copy::copy_into(&next, [path])?;
    log::debug!("created backup {}", next.display());
    Ok(Some(next))
}
