use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified result type for all fallible operations in numbak.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the numbered backup operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The path is not a regular file: a directory, a device, or similar.
    #[error("not a file: {}", .0.display())]
    NotRegularFile(PathBuf),

    /// The file already has `count` consecutive backups, which reaches `limit`.
    #[error("existing backups ({count}) exceed limit ({limit})")]
    LimitExceeded { count: usize, limit: i64 },

    /// Reading or writing `path` failed while copying; the destination was removed.
    #[error("failed to copy '{}': {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
