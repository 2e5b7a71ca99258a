//! Command-line interface definition for nbk.
//!
//! This module defines all CLI commands, their arguments, and the glue between them
//! and the numbak library: batch and recursive backups, counting, listing, copying
//! and configuration management.

use crate::application::{self, Application, ConfigError};
use crate::sysexits;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numbak::copy::copy_into;
use numbak::generation;
use numbak::{Limit, create_numbered_backup};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use tokio::runtime::Builder;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// Command-line interface definition for nbk.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Print debug output. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    pub commands: Option<Commands>,
}

/// Supported nbk commands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Create the next numbered backup (`FILE.~N~`) of each file.
    Backup {
        /// Files to back up. Directories require --recursive.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Maximum number of backups per file; 0 or less does nothing.
        /// Defaults to the configured limit.
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Back up every regular file below the given directories.
        #[arg(short, long)]
        recursive: bool,
    },
    /// Print the number of consecutive numbered backups of a file.
    Count {
        /// File to inspect.
        file: PathBuf,
    },
    /// List the consecutive numbered backups of a file, oldest first.
    List {
        /// File to inspect.
        file: PathBuf,
    },
    /// Concatenate one or more files into a new destination file.
    Copy {
        /// Destination file, created or truncated.
        destination: PathBuf,
        /// Source files, copied in order.
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// Display the configuration file path and the default limit, or change them.
    Config {
        /// Set the default backup limit.
        #[arg(short, long, allow_negative_numbers = true, conflicts_with = "reset")]
        limit: Option<i64>,
        /// Reset the configuration to its defaults.
        #[arg(short, long, conflicts_with = "limit")]
        reset: bool,
    },
}

/// Result of backing up one file: the file, and the backup created for it, if any.
type Outcome = (PathBuf, numbak::Result<Option<PathBuf>>);

/// Creates the next numbered backup of every file in `paths`.
///
/// Each created backup is printed on stdout. A failing file does not stop the others;
/// failures are reported on stderr and the process exits with the code of the first one.
///
/// # Errors
/// Returns an error if the configuration cannot be read or a directory walk fails.
pub(crate) fn backup(paths: Vec<PathBuf>, limit: Option<i64>, recursive: bool) -> Result<()> {
    let limit = match limit {
        Some(limit) => limit,
        None => Application::load_config()?.limit,
    };
    if Limit::from(limit) == Limit::Disabled {
        log::info!("backup limit is {limit}, nothing to do");
        return Ok(());
    }

    let files = collect_files(paths, recursive)?;
    let outcomes: Vec<Outcome> = if files.len() == 1 {
        files
            .into_iter()
            .map(|file| {
                let res = create_numbered_backup(&file, limit);
                (file, res)
            })
            .collect()
    } else {
        run_backups(files, limit)?
    };

    let mut first_failure = None;
    for (file, res) in outcomes {
        match res {
            Ok(Some(created)) => println!("{}", created.display()),
            Ok(None) => {}
            Err(e) => {
                eprintln!("nbk: {}: {e}", file.display());
                if first_failure.is_none() {
                    first_failure = Some(backup_exit_code(&e));
                }
            }
        }
    }
    if let Some(code) = first_failure {
        process::exit(code);
    }
    Ok(())
}

/// Backs up several files concurrently, one blocking task per file.
///
/// Outcomes are returned in the order of `files`.
fn run_backups(files: Vec<PathBuf>, limit: i64) -> Result<Vec<Outcome>> {
    let rt = Builder::new_multi_thread().enable_all().build()?;

    rt.block_on(async move {
        let mut set = JoinSet::new();
        for (index, file) in files.into_iter().enumerate() {
            set.spawn_blocking(move || {
                let res = create_numbered_backup(&file, limit);
                (index, file, res)
            });
        }
        let mut outcomes = Vec::with_capacity(set.len());
        while let Some(res) = set.join_next().await {
            outcomes.push(res.context("backup task failed")?);
        }
        outcomes.sort_by_key(|(index, _, _)| *index);
        Ok::<_, anyhow::Error>(
            outcomes
                .into_iter()
                .map(|(_, file, res)| (file, res))
                .collect(),
        )
    })
}

/// Expands the command-line paths into the list of files to back up.
///
/// With `recursive`, directories are walked and every regular file that is not itself
/// a numbered backup of a sibling file is collected.
///
/// Duplicates are dropped, keeping the first occurrence as the user typed it. Two paths
/// are the same file when they canonicalize to the same path, so `file`, `./file` and
/// `sub/../file` are scheduled once.
fn collect_files(paths: Vec<PathBuf>, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = vec![];
    for path in paths {
        if recursive && path.is_dir() {
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("failed to walk '{}'", path.display()))?;
                if !entry.file_type().is_file() || is_backup_file(entry.path()) {
                    continue;
                }
                let file = entry.into_path();
                if seen.insert(canonical_key(&file)) {
                    files.push(file);
                }
            }
        } else if seen.insert(canonical_key(&path)) {
            files.push(path);
        }
    }
    log::debug!("{} file(s) to back up", files.len());
    Ok(files)
}

/// Paths that cannot be resolved are kept as typed; backing them up reports the error.
fn canonical_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// A file is a backup when its name ends in a numbered suffix and the file it was
/// made from sits next to it. A lone `notes.~1~` is the user's own file.
fn is_backup_file(path: &Path) -> bool {
    match path.file_name().and_then(backup_base) {
        Some(base) => path.with_file_name(base).is_file(),
        None => false,
    }
}

/// Returns the base name of a numbered backup file name, e.g. `notes` for `notes.~1~`.
#[cfg(unix)]
fn backup_base(name: &OsStr) -> Option<&OsStr> {
    use std::os::unix::ffi::OsStrExt;

    let bytes = name.as_bytes();
    let start = bytes.windows(2).rposition(|w| w == b".~")?;
    let tail = std::str::from_utf8(&bytes[start..]).ok()?;
    generation::parse_suffix(tail)?;
    let base = &bytes[..start];
    (!base.is_empty()).then(|| OsStr::from_bytes(base))
}

/// Returns the base name of a numbered backup file name, e.g. `notes` for `notes.~1~`.
#[cfg(not(unix))]
fn backup_base(name: &OsStr) -> Option<&OsStr> {
    let (base, _) = name.to_str().and_then(generation::parse_generation)?;
    Some(OsStr::new(base))
}

/// Prints the number of consecutive numbered backups of `file`.
pub(crate) fn count(file: PathBuf) -> Result<()> {
    let n = generation::count_backups(&file)?;
    println!("{n}");
    Ok(())
}

/// Prints the consecutive numbered backups of `file`, one per line.
pub(crate) fn list(file: PathBuf) -> Result<()> {
    for backup in generation::list_backups(&file)? {
        println!("{}", backup.display());
    }
    Ok(())
}

/// Concatenates `sources` into `destination`.
pub(crate) fn copy(destination: PathBuf, sources: Vec<PathBuf>) -> Result<()> {
    copy_into(&destination, &sources)?;
    Ok(())
}

/// Prints the configuration, or updates it when `limit` or `reset` is given.
pub(crate) fn config(limit: Option<i64>, reset: bool) -> Result<()> {
    let mut app = if reset {
        Application::default()
    } else {
        Application::load_config()?
    };
    if let Some(limit) = limit {
        app.limit = limit;
    }
    if reset || limit.is_some() {
        app.write()?;
    }
    println!("config file: {}", application::config_file()?.display());
    println!("limit: {}", Limit::from(app.limit));
    Ok(())
}

/// Maps an error to the exit status reported by the process.
pub(crate) fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<numbak::Error>() {
        return backup_exit_code(e);
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return match e {
            ConfigError::NoConfigDir => sysexits::EX_UNAVAILABLE,
            _ => sysexits::EX_CONFIG,
        };
    }
    if err.downcast_ref::<walkdir::Error>().is_some() {
        return sysexits::EX_IOERR;
    }
    sysexits::EX_SOFTWARE
}

fn backup_exit_code(err: &numbak::Error) -> i32 {
    match err {
        numbak::Error::NotRegularFile(_) => sysexits::EX_NOINPUT,
        numbak::Error::Io(e) if e.kind() == ErrorKind::NotFound => sysexits::EX_NOINPUT,
        numbak::Error::LimitExceeded { .. } => sysexits::EX_CANTCREAT,
        numbak::Error::Copy { .. } | numbak::Error::Io(_) => sysexits::EX_IOERR,
    }
}
