//! numbak: GNU-style numbered backups for regular files.
//!
//! A backup of `notes.txt` is written beside it as `notes.txt.~1~`, the next one as
//! `notes.txt.~2~`, and so on. This crate provides the counting, limit enforcement and
//! copy logic behind the `nbk` CLI.

pub mod backup;
pub mod copy;
pub mod error;
pub mod generation;
pub mod probe;

pub use backup::{Limit, create_numbered_backup};
pub use error::{Error, Result};
