//! Destination-path computation for year-based organization.
//!
//! The remapper decides where a file belongs: an anchor directory, a
//! 4-digit year component, then the file's original path relative to that
//! anchor. Both sides of the mapping use the same anchor, so the relative
//! structure beneath each year directory matches the original tree exactly.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Where year directories are created relative to the source root.
///
/// `Inside` is the default: year directories nest within the organized
/// directory itself. `Beside` creates them as siblings of the source root,
/// so the root's own name becomes the first component under each year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Year directories are created inside the source root.
    Inside,
    /// Year directories are created next to the source root.
    Beside,
}

impl Anchor {
    /// Resolves this policy to a concrete anchor directory.
    ///
    /// Returns `None` for `Beside` when the source root has no parent,
    /// which happens when the root is the filesystem root.
    pub fn resolve(self, source_root: &Path) -> Option<PathBuf> {
        match self {
            Anchor::Inside => Some(source_root.to_path_buf()),
            Anchor::Beside => source_root.parent().map(Path::to_path_buf),
        }
    }
}

/// Returns true if `name` is exactly four ASCII digits.
///
/// Directories with such names are treated as year directories: the scanner
/// does not descend into them at the top level and the reconciler never
/// deletes them directly under the anchor.
pub fn is_year_component(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|s| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
}

/// Computes year-anchored destination paths.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use yearsort::remapper::Remapper;
///
/// let remapper = Remapper::new("/data/photos");
/// let destination = remapper.destination(Path::new("/data/photos/trip/a.jpg"), 2020);
/// assert_eq!(destination, Some(PathBuf::from("/data/photos/2020/trip/a.jpg")));
/// ```
pub struct Remapper {
    anchor: PathBuf,
}

impl Remapper {
    /// Creates a remapper around a resolved anchor directory.
    pub fn new(anchor: impl Into<PathBuf>) -> Self {
        Self {
            anchor: anchor.into(),
        }
    }

    /// The directory both sides of the mapping are relative to.
    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    /// Computes the destination for `file` given its creation `year`.
    ///
    /// The destination is `anchor/<year>/<relative-path>`, where the
    /// relative path is `file` with the anchor prefix stripped. Returns
    /// `None` when `file` does not live under the anchor; callers report
    /// that as a per-file error.
    ///
    /// A file whose destination equals its current path is already
    /// organized and must be skipped, not moved onto itself.
    pub fn destination(&self, file: &Path, year: i32) -> Option<PathBuf> {
        let relative = file.strip_prefix(&self.anchor).ok()?;
        Some(self.anchor.join(format!("{year:04}")).join(relative))
    }

    /// Renders `path` relative to the anchor for status lines.
    ///
    /// Falls back to the path as given when it is not under the anchor.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.anchor)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
