//! Test utilities and mocks for boardsense unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::MockFileSystem;
//!
//! let mut fs = MockFileSystem::new();
//! fs.add_file("/hw/avr/cores/arduino/Arduino.h", "");
//! let paths = ResolvedPaths::resolve(&props, &fs);
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use fixtures::*;

use crate::util::fs::FileSystem;

/// In-memory filesystem tree implementing [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: Vec<PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        MockFileSystem {
            files: HashMap::new(),
            dirs: Vec::new(),
        }
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        // Ensure parent directories exist
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() || self.dirs.contains(&path) {
            return;
        }

        let mut current = path.clone();
        while let Some(parent) = current.parent() {
            if parent.as_os_str().is_empty() {
                break;
            }
            if !self.dirs.contains(&parent.to_path_buf()) {
                self.dirs.push(parent.to_path_buf());
            }
            current = parent.to_path_buf();
        }
        self.dirs.push(path);
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.iter().any(|d| d == path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|d| d == path)
    }

    fn list_dirs(&self, path: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self
            .dirs
            .iter()
            .filter(|d| d.parent() == Some(path))
            .cloned()
            .collect();
        dirs.sort();
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_creates_parents() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/a/b/c.h", "");

        assert!(fs.is_file(Path::new("/a/b/c.h")));
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(fs.is_dir(Path::new("/a")));
        assert!(fs.exists(Path::new("/a/b/c.h")));
        assert!(!fs.exists(Path::new("/a/x")));
    }

    #[test]
    fn test_list_dirs_immediate_children_sorted() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("/root/zz/deep");
        fs.add_dir("/root/aa");
        fs.add_file("/root/file.txt", "");

        assert_eq!(
            fs.list_dirs(Path::new("/root")),
            vec![PathBuf::from("/root/aa"), PathBuf::from("/root/zz")]
        );
    }
}
