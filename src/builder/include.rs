//! Include search path candidates and the existence filter.
//!
//! Candidates are generated in a fixed precedence order (the analyzer
//! resolves ambiguous headers against earlier entries first) and then
//! filtered down to the ones that exist on disk.

use std::path::Path;

use crate::builder::toolchain::ToolchainIncludeSet;
use crate::core::paths::{join, normalize, ResolvedPaths};
use crate::util::fs::{to_slash, FileSystem};

/// Suffix asking the analyzer to search a directory recursively.
pub const RECURSIVE_MARKER: &str = "/**";

/// Where an include candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Workspace,
    Core,
    Variant,
    PlatformLibraries,
    UserLibraries,
    Toolchain,
}

impl CandidateOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateOrigin::Workspace => "workspace",
            CandidateOrigin::Core => "core",
            CandidateOrigin::Variant => "variant",
            CandidateOrigin::PlatformLibraries => "platform libraries",
            CandidateOrigin::UserLibraries => "user libraries",
            CandidateOrigin::Toolchain => "toolchain",
        }
    }
}

/// A directory that may end up on the include path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeCandidate {
    /// Directory, forward slashes, no recursive marker.
    pub path: String,
    /// Whether the entry is searched recursively.
    pub recursive: bool,
    pub origin: CandidateOrigin,
}

impl IncludeCandidate {
    /// A recursively searched directory.
    pub fn recursive(path: impl Into<String>, origin: CandidateOrigin) -> Self {
        IncludeCandidate {
            path: path.into(),
            recursive: true,
            origin,
        }
    }

    /// A directory searched without descending.
    pub fn exact(path: impl Into<String>, origin: CandidateOrigin) -> Self {
        IncludeCandidate {
            path: path.into(),
            recursive: false,
            origin,
        }
    }

    /// The entry as written to the include path.
    pub fn entry(&self) -> String {
        if self.recursive {
            format!("{}{}", self.path, RECURSIVE_MARKER)
        } else {
            self.path.clone()
        }
    }
}

/// Strip a trailing recursive marker from an include path entry.
pub fn strip_recursive_marker(entry: &str) -> &str {
    entry.strip_suffix(RECURSIVE_MARKER).unwrap_or(entry)
}

/// The user's sketchbook library folders.
///
/// `<Documents>/Arduino/libraries` (the IDE default on Windows and macOS)
/// and `<home>/Arduino/libraries` (the default on Linux).
pub fn user_library_dirs() -> Vec<String> {
    let Some(dirs) = directories::UserDirs::new() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    if let Some(documents) = dirs.document_dir() {
        out.push(to_slash(&documents.join("Arduino").join("libraries")));
    }
    let home = to_slash(&dirs.home_dir().join("Arduino").join("libraries"));
    if !out.contains(&home) {
        out.push(home);
    }
    out
}

/// Generate include candidates in precedence order.
///
/// Workspace, core, variant, platform libraries, user libraries, then the
/// scanned toolchain directories. Empty paths are skipped.
pub fn collect_candidates(
    workspace_root: &str,
    paths: &ResolvedPaths,
    user_library_dirs: &[String],
    toolchain: &ToolchainIncludeSet,
) -> Vec<IncludeCandidate> {
    let mut candidates = vec![
        IncludeCandidate::recursive(normalize(workspace_root), CandidateOrigin::Workspace),
        IncludeCandidate::recursive(paths.core_path.clone(), CandidateOrigin::Core),
        IncludeCandidate::recursive(paths.variant_path.clone(), CandidateOrigin::Variant),
        IncludeCandidate::recursive(
            join(&paths.platform_path, "libraries"),
            CandidateOrigin::PlatformLibraries,
        ),
    ];

    candidates.extend(
        user_library_dirs
            .iter()
            .map(|dir| IncludeCandidate::recursive(normalize(dir), CandidateOrigin::UserLibraries)),
    );
    candidates.extend(
        toolchain
            .dirs()
            .iter()
            .map(|dir| IncludeCandidate::recursive(dir.clone(), CandidateOrigin::Toolchain)),
    );

    candidates.retain(|c| !c.path.is_empty());
    candidates
}

/// Keep only candidates whose directory exists, in their original order.
///
/// Repeated entries keep their first position.
pub fn filter_existing(candidates: Vec<IncludeCandidate>, files: &dyn FileSystem) -> Vec<IncludeCandidate> {
    let mut kept: Vec<IncludeCandidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !files.exists(Path::new(&candidate.path)) {
            tracing::debug!(
                "dropping missing {} include path {}",
                candidate.origin.as_str(),
                candidate.path
            );
            continue;
        }
        if kept.iter().any(|k| k.entry() == candidate.entry()) {
            continue;
        }
        kept.push(candidate);
    }

    kept
}

/// Return `path` if it exists, else an empty string.
pub fn existing_or_empty(path: &str, files: &dyn FileSystem) -> String {
    let stripped = strip_recursive_marker(path);
    if !stripped.is_empty() && files.exists(Path::new(stripped)) {
        path.to_string()
    } else {
        String::new()
    }
}
