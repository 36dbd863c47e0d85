//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Read-only view of the filesystem used while resolving a toolchain.
///
/// Every existence check and directory listing in the configuration
/// pipeline goes through this trait, so the pipeline can run against an
/// in-memory tree in tests.
pub trait FileSystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`, sorted by name.
    ///
    /// Returns an empty list if `path` is missing or unreadable.
    fn list_dirs(&self, path: &Path) -> Vec<PathBuf>;
}

/// [`FileSystem`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path) -> Vec<PathBuf> {
        if !path.is_dir() {
            return Vec::new();
        }

        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("skipping unreadable entry under {}: {}", path.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.into_path())
            .collect()
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Read a file if it exists.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    if path.is_file() {
        read_to_string(path).map(Some)
    } else {
        Ok(None)
    }
}

/// Replace a file's contents in a single step.
///
/// The contents go to a temporary file in the destination directory which
/// is then renamed over `path`, so readers see either the old file or the
/// complete new one. Parent directories are created as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush file: {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file: {}", path.display()))?;

    Ok(())
}

/// Render a path with forward slashes.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
