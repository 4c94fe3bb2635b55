//! Best-effort creation-date lookup.
//!
//! "Creation date" is platform-dependent: a real birth time exists where
//! the platform and filesystem record one (Windows, macOS, recent Linux
//! filesystems), and the last-modification time stands in everywhere else.
//! The lookup sits behind the [`Timestamper`] trait so the pipeline can be
//! driven with scripted dates in tests.

use crate::relocator::{OrganizeError, OrganizeResult};
use chrono::{DateTime, Datelike, Local};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Metadata-lookup capability for a file's best-available creation time.
pub trait Timestamper {
    /// Returns the best-available creation timestamp for `path`.
    fn timestamp(&self, path: &Path) -> io::Result<SystemTime>;
}

/// Timestamper backed by real filesystem metadata.
///
/// Prefers the platform's birth or creation time and falls back to the
/// modification time when none is recorded. The result approximates
/// creation time; it is not a guarantee on every platform.
pub struct FsTimestamper;

impl Timestamper for FsTimestamper {
    fn timestamp(&self, path: &Path) -> io::Result<SystemTime> {
        let metadata = fs::metadata(path)?;
        // created() reports Unsupported where the platform or filesystem
        // keeps no birth time.
        metadata.created().or_else(|_| metadata.modified())
    }
}

/// Returns the local calendar year of `path`'s creation timestamp.
///
/// # Errors
///
/// Returns [`OrganizeError::MetadataUnreadable`] when metadata cannot be
/// read (permissions, file vanished mid-run). Callers count this as a
/// per-file error and continue with the remaining files.
pub fn creation_year(timestamper: &dyn Timestamper, path: &Path) -> OrganizeResult<i32> {
    let timestamp =
        timestamper
            .timestamp(path)
            .map_err(|e| OrganizeError::MetadataUnreadable {
                path: path.to_path_buf(),
                source: e,
            })?;
    Ok(DateTime::<Local>::from(timestamp).year())
}
