use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use crate::{Error, Result};

/// Copies any number of files, in order, into a freshly created `destination`.
///
/// The destination is created (or truncated) first and receives the concatenated
/// contents of every source. Passing no sources leaves an empty destination.
///
/// # Errors
/// * [`Error::Io`] if the destination cannot be created.
/// * [`Error::Copy`] naming the source that could not be opened, read or written out.
///   The partially written destination is removed before returning.
/// * [`Error::Io`] if the written data cannot be flushed to disk; the destination is
///   removed as well.
pub fn copy_into<I, P>(destination: &Path, sources: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut dest = File::create(destination)?;

    for source in sources {
        let source = source.as_ref();
        if let Err(e) = append(&mut dest, source) {
            drop(dest);
            discard(destination);
            return Err(Error::Copy {
                path: source.to_path_buf(),
                source: e,
            });
        }
    }
    if let Err(e) = dest.sync_all() {
        drop(dest);
        discard(destination);
        return Err(e.into());
    }
    Ok(())
}

fn append(dest: &mut File, source: &Path) -> io::Result<u64> {
    let mut reader = BufReader::new(File::open(source)?);
    io::copy(&mut reader, dest)
}

fn discard(destination: &Path) {
    if let Err(e) = fs::remove_file(destination) {
        log::warn!(
            "failed to remove partial copy '{}': {e}",
            destination.display()
        );
    }
}
