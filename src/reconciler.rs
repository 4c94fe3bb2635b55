//! Post-move cleanup of directories emptied by relocation.

use crate::remapper::is_year_component;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Removes directories left empty after files were moved out of them.
///
/// The walk runs bottom-up so removing a leaf can make its parent
/// removable within the same pass. The source root itself and year
/// directories sitting directly under the anchor are never removed; they
/// are intentional structure, not leftovers. A directory that cannot be
/// removed (still populated, permission denied) is left in place without
/// any log noise.
pub struct Reconciler {
    root: PathBuf,
    anchor: PathBuf,
}

impl Reconciler {
    pub fn new(root: impl Into<PathBuf>, anchor: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            anchor: anchor.into(),
        }
    }

    /// Prunes empty directories beneath the root, returning what was
    /// removed, deepest first.
    pub fn prune(&self) -> Vec<PathBuf> {
        let mut removed = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_map(Result::ok);

        for entry in walker {
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.path().parent() == Some(self.anchor.as_path())
                && is_year_component(entry.file_name())
            {
                continue;
            }
            // remove_dir refuses non-empty directories, which doubles as
            // the emptiness test.
            if fs::remove_dir(entry.path()).is_ok() {
                removed.push(entry.path().to_path_buf());
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_nested_empty_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a").join("b").join("c"))
            .expect("Failed to create subdirectories");

        let removed = Reconciler::new(root, root).prune();

        assert_eq!(removed.len(), 3);
        assert!(!root.join("a").exists());
        assert!(root.exists());
    }

    #[test]
    fn test_keeps_year_directories_under_anchor() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("2020")).expect("Failed to create year directory");
        fs::create_dir(root.join("sub")).expect("Failed to create subdirectory");

        let removed = Reconciler::new(root, root).prune();

        assert_eq!(removed.len(), 1);
        assert!(root.join("2020").exists(), "empty year directory survives");
        assert!(!root.join("sub").exists());
    }

    #[test]
    fn test_year_directories_away_from_anchor_are_fair_game() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub").join("1999"))
            .expect("Failed to create subdirectories");

        Reconciler::new(root, root).prune();

        assert!(!root.join("sub").exists());
    }

    #[test]
    fn test_keeps_populated_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("keep")).expect("Failed to create subdirectory");
        fs::write(root.join("keep").join("file.txt"), "x").expect("Failed to write file");

        let removed = Reconciler::new(root, root).prune();

        assert!(removed.is_empty());
        assert!(root.join("keep").join("file.txt").exists());
    }

    #[test]
    fn test_empty_root_is_never_removed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let removed = Reconciler::new(root, root).prune();

        assert!(removed.is_empty());
        assert!(root.exists());
    }
}
