//! Physical layout of an installed board platform.
//!
//! Paths are kept as forward-slash strings: they are written verbatim into
//! the editor configuration, and an empty string stands for "not found".

use std::path::Path;

use crate::core::properties::{keys, BuildPropertySet};
use crate::util::fs::FileSystem;

/// Compiler driver used when the platform does not report one.
pub const DEFAULT_CXX_DRIVER: &str = "g++";

/// Header every sketch implicitly includes.
pub const ROOT_HEADER: &str = "Arduino.h";

/// Resolved platform, core, variant, and compiler locations for one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root of the platform package.
    pub platform_path: String,
    /// Core sources (contains `Arduino.h` on most platforms).
    pub core_path: String,
    /// Board variant sources (`pins_arduino.h`).
    pub variant_path: String,
    /// Full path of the C++ compiler driver, or a bare command name.
    pub compiler_executable_path: String,
    /// Full path of the root header, empty if none was found.
    pub header_entry_point_path: String,
}

impl ResolvedPaths {
    /// Resolve paths for the host platform's executable suffix.
    pub fn resolve(props: &BuildPropertySet, files: &dyn FileSystem) -> Self {
        Self::resolve_with_exe_suffix(props, files, std::env::consts::EXE_SUFFIX)
    }

    /// Resolve paths, appending `exe_suffix` (e.g. `.exe`) to the compiler.
    pub fn resolve_with_exe_suffix(
        props: &BuildPropertySet,
        files: &dyn FileSystem,
        exe_suffix: &str,
    ) -> Self {
        let platform_path = normalize(props.get(keys::PLATFORM_PATH).unwrap_or_default());

        let core_path = match props.get_non_empty(keys::CORE_PATH) {
            Some(explicit) => normalize(explicit),
            None => join_named(&platform_path, "cores", props.get(keys::CORE)),
        };

        // A present variant path wins, even when empty.
        let variant_path = match props.get(keys::VARIANT_PATH) {
            Some(explicit) => normalize(explicit),
            None => join_named(&platform_path, "variants", props.get(keys::VARIANT)),
        };

        let compiler_executable_path = compiler_executable(
            &normalize(props.get(keys::COMPILER_PATH).unwrap_or_default()),
            &normalize(props.get(keys::COMPILER_CPP_CMD).unwrap_or_default()),
            exe_suffix,
        );

        let header_entry_point_path = find_root_header(&platform_path, &core_path, files);

        tracing::debug!(
            platform = %platform_path,
            core = %core_path,
            variant = %variant_path,
            compiler = %compiler_executable_path,
            header = %header_entry_point_path,
            "resolved platform paths"
        );

        ResolvedPaths {
            platform_path,
            core_path,
            variant_path,
            compiler_executable_path,
            header_entry_point_path,
        }
    }
}

/// Normalize a path reported by the toolchain.
///
/// Trims whitespace, strips one pair of surrounding quotes, converts
/// backslashes to forward slashes, and drops trailing slashes (except on a
/// bare root).
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&q| {
            trimmed
                .strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .unwrap_or(trimmed);

    let slashed = unquoted.trim().replace('\\', "/");
    let stripped = slashed.trim_end_matches('/');
    if stripped.is_empty() && !slashed.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Join path segments with `/`. An empty base yields an empty path.
pub fn join(base: &str, segment: &str) -> String {
    if base.is_empty() {
        return String::new();
    }
    format!("{}/{}", base.trim_end_matches('/'), segment)
}

/// `<platform>/<dir>/<name>`, or empty when either end is missing.
fn join_named(platform: &str, dir: &str, name: Option<&str>) -> String {
    match name.map(normalize) {
        Some(name) if !name.is_empty() => join(&join(platform, dir), &name),
        _ => String::new(),
    }
}

/// Build the compiler executable path from its directory and command name.
///
/// A missing directory leaves the command bare so the caller's `PATH`
/// resolves it. The suffix is compared case-insensitively.
pub fn compiler_executable(dir: &str, cmd: &str, exe_suffix: &str) -> String {
    let mut name = if cmd.is_empty() {
        DEFAULT_CXX_DRIVER.to_string()
    } else {
        cmd.to_string()
    };

    if !exe_suffix.is_empty()
        && !name
            .to_ascii_lowercase()
            .ends_with(&exe_suffix.to_ascii_lowercase())
    {
        name.push_str(exe_suffix);
    }

    if dir.is_empty() {
        name
    } else {
        join(dir, &name)
    }
}

/// First directory holding [`ROOT_HEADER`], as the header's full path.
fn find_root_header(platform_path: &str, core_path: &str, files: &dyn FileSystem) -> String {
    let candidates = [
        core_path.to_string(),
        join(core_path, "api"),
        join(&join(platform_path, "api"), "core"),
    ];

    candidates
        .iter()
        .filter(|dir| !dir.is_empty())
        .map(|dir| join(dir, ROOT_HEADER))
        .find(|header| files.is_file(Path::new(header)))
        .unwrap_or_default()
}
