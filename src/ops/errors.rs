//! Configuration error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{Fix, Report};

/// Error while configuring a workspace for a board.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigureError {
    /// The property dump could not be obtained. Nothing was written.
    #[error("failed to retrieve build properties for `{fqbn}` from {source_name}")]
    #[diagnostic(
        code(boardsense::configure::retrieval),
        help("check that the board package is installed: `arduino-cli core list`")
    )]
    Retrieval {
        fqbn: String,
        source_name: String,
        message: String,
    },

    /// The existing settings file could not be parsed.
    #[error("cannot merge into {}: {message}", .path.display())]
    #[diagnostic(
        code(boardsense::configure::malformed_settings),
        help("fix or remove the file; the analysis descriptor was still written")
    )]
    MalformedSettings { path: PathBuf, message: String },
}

impl ConfigureError {
    /// Convert to a terminal report.
    pub fn to_report(&self) -> Report {
        match self {
            ConfigureError::Retrieval {
                fqbn,
                source_name,
                message,
            } => Report::error(format!(
                "failed to retrieve build properties for `{}`",
                fqbn
            ))
            .fact(format!("source: {}", source_name))
            .tool_output(message)
            .fix(Fix::InstallCore)
            .fix(Fix::CapturedProperties),

            ConfigureError::MalformedSettings { path, message } => {
                Report::error("existing editor settings are not valid JSON")
                    .file(path)
                    .fact(message.clone())
                    .fact("the analysis descriptor was written; settings were left untouched")
                    .fix(Fix::RepairSettings)
            }
        }
    }
}
