//! Source-tree enumeration.
//!
//! The scanner validates the source root once, then materializes the full
//! file list before any relocation starts, so directories created or
//! removed during processing cannot perturb the walk. Top-level directories
//! named like years are treated as already organized and are not entered.

use crate::remapper::is_year_component;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fatal errors raised while validating the source root.
///
/// Any of these aborts the run before a single file is touched.
#[derive(Debug)]
pub enum ScanError {
    /// The given directory does not exist.
    NotFound(PathBuf),
    /// The given path exists but is not a directory.
    NotADirectory(PathBuf),
    /// The given path could not be resolved to a canonical location.
    Unresolvable { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Directory '{}' does not exist", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Self::Unresolvable { path, source } => {
                write!(f, "Cannot resolve '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// The materialized result of one walk over the source tree.
#[derive(Debug)]
pub struct Snapshot {
    /// Absolute paths of every regular file found, in sorted walk order.
    pub files: Vec<PathBuf>,
    /// Names of top-level year directories that were not entered.
    pub skipped_year_dirs: Vec<String>,
}

/// Walks the source tree and produces file snapshots.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Validates `path` and resolves it to an absolute canonical root.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when the path is missing, is not a
    /// directory, or cannot be canonicalized.
    pub fn new(path: &Path) -> Result<Self, ScanError> {
        if !path.exists() {
            return Err(ScanError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(ScanError::NotADirectory(path.to_path_buf()));
        }
        let root = fs::canonicalize(path).map_err(|e| ScanError::Unresolvable {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { root })
    }

    /// The canonical source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerates every regular file under the root.
    ///
    /// Directories whose name is exactly four ASCII digits are pruned at
    /// the top level only; the same name deeper in the tree is walked
    /// normally. Entries that cannot be read mid-walk are skipped, and
    /// symbolic links are not followed.
    pub fn snapshot(&self) -> Snapshot {
        let mut files = Vec::new();
        let mut skipped_year_dirs = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        for entry in walker.filter_entry(|entry| {
            let prune = entry.depth() == 1
                && entry.file_type().is_dir()
                && is_year_component(entry.file_name());
            if prune {
                skipped_year_dirs.push(entry.file_name().to_string_lossy().into_owned());
            }
            !prune
        }) {
            let Ok(entry) = entry else { continue };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Snapshot {
            files,
            skipped_year_dirs,
        }
    }
}
