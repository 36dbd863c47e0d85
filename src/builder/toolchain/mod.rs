//! Toolchain system-include discovery.
//!
//! Board packages ship their GCC under `<root>/bin/`, with the C library
//! headers in `<root>/<target-triple>/include` and the compiler's own
//! headers under `<root>/lib/gcc/...`. The triple differs per vendor
//! (`avr`, `arm-none-eabi`, `xtensa-esp32-elf`, ...), so it is discovered
//! by listing the install root rather than assumed.

use std::path::Path;

use crate::core::paths::{join, normalize};
use crate::util::fs::{to_slash, FileSystem};

/// Directory name under `<root>/lib` holding compiler-private headers.
pub const COMPILER_FAMILY: &str = "gcc";

/// Ordered, duplicate-free list of discovered include directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainIncludeSet {
    dirs: Vec<String>,
}

impl ToolchainIncludeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ToolchainIncludeSet::default()
    }

    /// Append a directory unless it is already present.
    pub fn push(&mut self, dir: impl Into<String>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    /// Discovered directories in discovery order.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Install root of a compiler: two levels above the executable.
///
/// `/opt/avr/bin/avr-g++` gives `/opt/avr`. A bare command name has no
/// install root.
pub fn install_root(compiler_executable: &str) -> Option<String> {
    let root = Path::new(compiler_executable).parent()?.parent()?;
    if root.as_os_str().is_empty() {
        return None;
    }
    Some(normalize(&to_slash(root)))
}

/// Discover system include directories under a toolchain install root.
///
/// Every immediate subdirectory containing an `include` directory
/// contributes `<sub>/include`, in name order. `<root>/lib/gcc` follows if
/// it exists. A missing root yields an empty set.
pub fn scan(root: &str, files: &dyn FileSystem) -> ToolchainIncludeSet {
    let mut set = ToolchainIncludeSet::new();
    let root_path = Path::new(root);

    if root.is_empty() || !files.is_dir(root_path) {
        tracing::debug!("toolchain root `{}` not found, skipping scan", root);
        return set;
    }

    for sub in files.list_dirs(root_path) {
        let include = sub.join("include");
        if files.is_dir(&include) {
            tracing::debug!("found toolchain include dir {}", include.display());
            set.push(normalize(&to_slash(&include)));
        }
    }

    let family = join(&join(root, "lib"), COMPILER_FAMILY);
    if files.is_dir(Path::new(&family)) {
        set.push(family);
    }

    set
}

/// Scan the install root of `compiler_executable`.
pub fn scan_compiler(compiler_executable: &str, files: &dyn FileSystem) -> ToolchainIncludeSet {
    match install_root(compiler_executable) {
        Some(root) => scan(&root, files),
        None => ToolchainIncludeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFileSystem;

    #[test]
    fn test_install_root() {
        assert_eq!(install_root("/opt/avr/bin/avr-g++").as_deref(), Some("/opt/avr"));
        assert_eq!(
            install_root("C:/avr/bin/avr-g++.exe").as_deref(),
            Some("C:/avr")
        );
        assert_eq!(install_root("avr-g++"), None);
        assert_eq!(install_root("bin/avr-g++"), None);
    }

    #[test]
    fn test_scan_missing_root() {
        let fs = MockFileSystem::new();
        assert!(scan("/opt/missing", &fs).is_empty());
        assert!(scan("", &fs).is_empty());
    }

    #[test]
    fn test_scan_root_without_subdirs() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("/opt/avr");
        assert!(scan("/opt/avr", &fs).is_empty());
    }

    #[test]
    fn test_scan_discovers_unknown_triples() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("/opt/xtensa/xtensa-esp32-elf/include");
        fs.add_dir("/opt/xtensa/bin");
        fs.add_dir("/opt/xtensa/arm-vendor-eabi/include");
        fs.add_dir("/opt/xtensa/share/doc");

        let set = scan("/opt/xtensa", &fs);
        assert_eq!(
            set.dirs(),
            &[
                "/opt/xtensa/arm-vendor-eabi/include".to_string(),
                "/opt/xtensa/xtensa-esp32-elf/include".to_string(),
            ]
        );
    }

    #[test]
    fn test_scan_appends_compiler_family_last() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("/opt/avr/avr/include");
        fs.add_dir("/opt/avr/lib/gcc/avr/7.3.0/include");

        let set = scan("/opt/avr", &fs);
        assert_eq!(
            set.dirs(),
            &["/opt/avr/avr/include".to_string(), "/opt/avr/lib/gcc".to_string()]
        );
    }

    #[test]
    fn test_scan_collapses_duplicates() {
        let mut fs = MockFileSystem::new();
        // `lib/include` is a subdir-with-include and must not repeat.
        fs.add_dir("/opt/t/lib/include");
        fs.add_dir("/opt/t/lib/gcc");

        let mut set = scan("/opt/t", &fs);
        set.push("/opt/t/lib/gcc");
        assert_eq!(
            set.dirs(),
            &["/opt/t/lib/include".to_string(), "/opt/t/lib/gcc".to_string()]
        );
    }

    #[test]
    fn test_scan_compiler_bare_command() {
        let fs = MockFileSystem::new();
        assert!(scan_compiler("g++", &fs).is_empty());
    }
}
