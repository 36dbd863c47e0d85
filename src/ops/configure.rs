//! Implementation of `boardsense configure` and `boardsense inspect`.
//!
//! The pipeline runs in stages, each a pure function of the previous one:
//! parse the property dump, resolve platform paths, scan the toolchain,
//! classify the target, filter include candidates, synthesize the
//! descriptor. Files are only written once everything is built in memory.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::descriptor::AnalysisConfig;
use crate::builder::include::{collect_candidates, filter_existing, user_library_dirs};
use crate::builder::toolchain::{self, ToolchainIncludeSet};
use crate::core::mode::classify;
use crate::core::paths::ResolvedPaths;
use crate::core::properties::{keys, BuildPropertySet};
use crate::core::{AnalysisMode, TargetContext};
use crate::ops::errors::ConfigureError;
use crate::ops::settings::merge_settings;
use crate::sources::PropertySource;
use crate::util::fs::{read_optional, to_slash, write_atomic, FileSystem};

/// Editor configuration directory inside the workspace.
pub const EDITOR_DIR: &str = ".vscode";

/// Descriptor file name.
pub const DESCRIPTOR_FILE: &str = "c_cpp_properties.json";

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

/// Options for configuring a workspace.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Sketchbook library folders to offer as include paths.
    pub user_library_dirs: Vec<String>,

    /// Executable suffix appended to the compiler command.
    pub exe_suffix: String,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        ConfigureOptions {
            user_library_dirs: user_library_dirs(),
            exe_suffix: std::env::consts::EXE_SUFFIX.to_string(),
        }
    }
}

/// Everything derived from one property dump.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub properties: BuildPropertySet,
    pub paths: ResolvedPaths,
    pub toolchain: ToolchainIncludeSet,
    pub config: AnalysisConfig,
}

impl Synthesis {
    pub fn mode(&self) -> AnalysisMode {
        self.config.mode
    }
}

/// Outcome of a successful `configure`.
#[derive(Debug, Clone)]
pub struct ConfigureReport {
    pub mode: AnalysisMode,
    pub descriptor_path: PathBuf,
    pub settings_path: PathBuf,
    /// Whether the settings file was rewritten.
    pub settings_updated: bool,
    pub synthesis: Synthesis,
}

/// Path of the descriptor for a workspace.
pub fn descriptor_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(EDITOR_DIR).join(DESCRIPTOR_FILE)
}

/// Path of the editor settings for a workspace.
pub fn settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(EDITOR_DIR).join(SETTINGS_FILE)
}

/// Run the in-memory pipeline over a property dump.
///
/// Never fails: missing properties and components degrade to empty or
/// omitted fields.
pub fn synthesize(
    dump: &str,
    workspace_root: &str,
    opts: &ConfigureOptions,
    files: &dyn FileSystem,
) -> Synthesis {
    let properties = BuildPropertySet::parse(dump);
    tracing::debug!("parsed {} build properties", properties.len());

    let paths = ResolvedPaths::resolve_with_exe_suffix(&properties, files, &opts.exe_suffix);
    let toolchain = toolchain::scan_compiler(&paths.compiler_executable_path, files);

    let mode = classify(
        properties.get(keys::ARCH).unwrap_or_default(),
        &paths.compiler_executable_path,
    );

    let candidates = collect_candidates(workspace_root, &paths, &opts.user_library_dirs, &toolchain);
    let include_path = filter_existing(candidates, files);

    let config = AnalysisConfig::synthesize(&properties, &paths, mode, include_path, files);

    Synthesis {
        properties,
        paths,
        toolchain,
        config,
    }
}

fn fetch(target: &TargetContext, source: &dyn PropertySource) -> Result<String, ConfigureError> {
    source
        .fetch(target)
        .map_err(|e| ConfigureError::Retrieval {
            fqbn: target.fqbn().to_string(),
            source_name: source.name().to_string(),
            message: format!("{:#}", e),
        })
}

/// Resolve a board's configuration without writing anything.
pub fn inspect(
    target: &TargetContext,
    source: &dyn PropertySource,
    opts: &ConfigureOptions,
    files: &dyn FileSystem,
) -> Result<Synthesis> {
    let dump = fetch(target, source)?;
    let root = target
        .workspace_root()
        .map(|r| to_slash(&r))
        .unwrap_or_default();
    Ok(synthesize(&dump, &root, opts, files))
}

/// Configure a workspace for the selected board.
///
/// Returns `Ok(None)` without touching anything when no workspace root can
/// be determined. A retrieval failure aborts before any write. A malformed
/// settings file fails after the descriptor has been written.
pub fn configure(
    target: &TargetContext,
    source: &dyn PropertySource,
    opts: &ConfigureOptions,
    files: &dyn FileSystem,
) -> Result<Option<ConfigureReport>> {
    let Some(root) = target.workspace_root() else {
        tracing::debug!("no workspace or active document, nothing to configure");
        return Ok(None);
    };

    let dump = fetch(target, source)?;
    let synthesis = synthesize(&dump, &to_slash(&root), opts, files);
    let descriptor = synthesis.config.to_document_string()?;

    let descriptor_path = descriptor_path(&root);
    let settings_path = settings_path(&root);

    // Settings are read before the first write so both files reflect the
    // same run.
    let existing_settings = read_optional(&settings_path)?;
    let merged = merge_settings(existing_settings.as_deref(), &settings_path);

    write_atomic(&descriptor_path, &descriptor)?;
    tracing::info!("wrote {}", descriptor_path.display());

    let merged = merged?;
    let settings_updated = merged.changed;
    if settings_updated {
        write_atomic(&settings_path, &merged.text)?;
        tracing::info!("wrote {}", settings_path.display());
    } else {
        tracing::debug!("{} already up to date", settings_path.display());
    }

    tracing::info!(
        "configured `{}` with analysis mode {}",
        target.fqbn(),
        synthesis.mode()
    );

    Ok(Some(ConfigureReport {
        mode: synthesis.mode(),
        descriptor_path,
        settings_path,
        settings_updated,
        synthesis,
    }))
}
