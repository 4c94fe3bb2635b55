//! File transfer into the year structure.
//!
//! This module performs the per-file mutation: creating missing destination
//! directories and moving or copying the file there. It also owns the
//! per-file error taxonomy and the run's aggregate counters.

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while dating or relocating a single file.
///
/// These never abort the run: the caller reports them, counts them, and
/// continues with the next file.
#[derive(Debug)]
pub enum OrganizeError {
    /// File metadata could not be read.
    MetadataUnreadable { path: PathBuf, source: io::Error },
    /// A destination directory could not be created.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// The file could not be moved or copied.
    TransferFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// A copy wrote fewer bytes than the source holds.
    CopyIncomplete {
        destination: PathBuf,
        expected: u64,
        written: u64,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MetadataUnreadable { path, source } => {
                write!(f, "Cannot read metadata for {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::TransferFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to transfer {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::CopyIncomplete {
                destination,
                expected,
                written,
            } => {
                write!(
                    f,
                    "Short copy to {}: wrote {} of {} bytes",
                    destination.display(),
                    written,
                    expected
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for per-file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Aggregate counters for one run.
///
/// Every discovered file lands in exactly one bucket: transferred, already
/// in place, or errored. The counters live for a single run and are
/// reported in the final summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Files moved or copied (or that would be, in dry-run mode).
    pub processed: usize,
    /// Files already at their computed destination.
    pub skipped: usize,
    /// Files that could not be dated or transferred.
    pub errors: usize,
}

impl RunStats {
    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Total number of files accounted for.
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.errors
    }
}

/// Whether files are moved into the year structure or duplicated there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Move,
    Copy,
}

/// What a relocation did, or would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file now exists at the destination.
    Transferred,
    /// Dry run: nothing was touched. Carries the closest missing ancestor
    /// of the destination when directories would have to be created.
    WouldTransfer { missing_dir: Option<PathBuf> },
}

/// Moves or copies files to their computed destinations.
///
/// A dry-run relocator computes outcomes without mutating the filesystem.
pub struct Relocator {
    mode: Mode,
    dry_run: bool,
}

impl Relocator {
    pub fn new(mode: Mode, dry_run: bool) -> Self {
        Self { mode, dry_run }
    }

    /// Ensures the file at `source` ends up at `destination`.
    ///
    /// Missing ancestor directories of the destination are created first;
    /// creation is idempotent and succeeds when they already exist.
    ///
    /// Move mode renames when source and destination share a volume. When
    /// the rename fails (cross-volume moves being the expected cause), the
    /// file is copied, the copy is verified by size, and only then is the
    /// source removed, so an interrupted fallback never loses data.
    ///
    /// Copy mode duplicates content and carries the source's access and
    /// modification times onto the copy; the source is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`OrganizeError`] describing the failing step. The
    /// destination may retain a verified copy when only the final source
    /// removal of a move fallback failed.
    pub fn relocate(&self, source: &Path, destination: &Path) -> OrganizeResult<Outcome> {
        if self.dry_run {
            let missing_dir = destination
                .parent()
                .filter(|parent| !parent.exists())
                .map(Path::to_path_buf);
            return Ok(Outcome::WouldTransfer { missing_dir });
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        match self.mode {
            Mode::Move => self.move_file(source, destination)?,
            Mode::Copy => copy_verified(source, destination)?,
        }

        Ok(Outcome::Transferred)
    }

    fn move_file(&self, source: &Path, destination: &Path) -> OrganizeResult<()> {
        if fs::rename(source, destination).is_ok() {
            return Ok(());
        }

        // Renames fail across filesystems. The destination copy is verified
        // before the source is unlinked.
        copy_verified(source, destination)?;
        fs::remove_file(source).map_err(|e| OrganizeError::TransferFailed {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_error: e,
        })
    }
}

/// Copies `source` to `destination`, verifies the byte count, and carries
/// the source's access and modification times onto the copy.
fn copy_verified(source: &Path, destination: &Path) -> OrganizeResult<()> {
    let metadata = fs::metadata(source).map_err(|e| OrganizeError::MetadataUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let written = fs::copy(source, destination).map_err(|e| OrganizeError::TransferFailed {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error: e,
    })?;

    if written != metadata.len() {
        let _ = fs::remove_file(destination);
        return Err(OrganizeError::CopyIncomplete {
            destination: destination.to_path_buf(),
            expected: metadata.len(),
            written,
        });
    }

    // Timestamp preservation is best-effort; the copy itself succeeded.
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    let _ = filetime::set_file_times(destination, atime, mtime);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_creates_ancestors_and_moves() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "photo bytes").expect("Failed to write test file");

        let destination = temp_dir.path().join("2020").join("trip").join("a.jpg");
        let relocator = Relocator::new(Mode::Move, false);
        let outcome = relocator
            .relocate(&source, &destination)
            .expect("move should succeed");

        assert_eq!(outcome, Outcome::Transferred);
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "photo bytes");
    }

    #[test]
    fn test_move_into_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "x").expect("Failed to write test file");

        let year_dir = temp_dir.path().join("2020");
        fs::create_dir(&year_dir).expect("Failed to create year directory");

        let destination = year_dir.join("a.jpg");
        Relocator::new(Mode::Move, false)
            .relocate(&source, &destination)
            .expect("move into existing directory should succeed");

        assert!(destination.exists());
    }

    #[test]
    fn test_copy_leaves_source_intact() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "photo bytes").expect("Failed to write test file");

        let destination = temp_dir.path().join("2020").join("a.jpg");
        Relocator::new(Mode::Copy, false)
            .relocate(&source, &destination)
            .expect("copy should succeed");

        assert_eq!(fs::read_to_string(&source).unwrap(), "photo bytes");
        assert_eq!(fs::read_to_string(&destination).unwrap(), "photo bytes");
    }

    #[test]
    fn test_copy_preserves_modification_time() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "photo bytes").expect("Failed to write test file");

        let past = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&source, past).expect("Failed to set mtime");

        let destination = temp_dir.path().join("2020").join("a.jpg");
        Relocator::new(Mode::Copy, false)
            .relocate(&source, &destination)
            .expect("copy should succeed");

        let copied = fs::metadata(&destination).expect("Failed to stat copy");
        assert_eq!(
            FileTime::from_last_modification_time(&copied).unix_seconds(),
            1_000_000_000
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "x").expect("Failed to write test file");

        let destination = temp_dir.path().join("2020").join("a.jpg");
        let outcome = Relocator::new(Mode::Move, true)
            .relocate(&source, &destination)
            .expect("dry run should succeed");

        assert_eq!(
            outcome,
            Outcome::WouldTransfer {
                missing_dir: Some(temp_dir.path().join("2020")),
            }
        );
        assert!(source.exists());
        assert!(!destination.exists());
        assert!(!temp_dir.path().join("2020").exists());
    }

    #[test]
    fn test_dry_run_reports_existing_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.jpg");
        fs::write(&source, "x").expect("Failed to write test file");

        let year_dir = temp_dir.path().join("2020");
        fs::create_dir(&year_dir).expect("Failed to create year directory");

        let outcome = Relocator::new(Mode::Move, true)
            .relocate(&source, &year_dir.join("a.jpg"))
            .expect("dry run should succeed");

        assert_eq!(outcome, Outcome::WouldTransfer { missing_dir: None });
    }

    #[test]
    fn test_vanished_source_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("gone.jpg");
        let destination = temp_dir.path().join("2020").join("gone.jpg");

        let result = Relocator::new(Mode::Move, false).relocate(&source, &destination);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_buckets_are_disjoint() {
        let mut stats = RunStats::default();
        stats.record_processed();
        stats.record_processed();
        stats.record_skipped();
        stats.record_error();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total(), 4);
    }
}
