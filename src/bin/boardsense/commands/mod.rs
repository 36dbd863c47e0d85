//! Command implementations

pub mod completions;
pub mod configure;
pub mod inspect;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::TargetArgs;
use boardsense::sources::{ArduinoCli, CapturedProperties, PropertySource};
use boardsense::util::config::{global_config_path, load_config, project_config_path};
use boardsense::util::fs::read_to_string;

/// Pick the property source for a command.
///
/// `--properties` reads a captured dump; otherwise arduino-cli is located
/// through the global and workspace configuration.
pub fn property_source(
    args: &TargetArgs,
    workspace_root: Option<&Path>,
) -> Result<Box<dyn PropertySource>> {
    if let Some(ref path) = args.properties {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read properties from stdin")?;
            buf
        } else {
            read_to_string(path)?
        };
        return Ok(Box::new(CapturedProperties::new(text)));
    }

    let project = workspace_root.map(project_config_path);
    let mut config = load_config(global_config_path().as_deref(), project.as_deref());
    if let Some(ref cli_path) = args.cli_path {
        config.cli.path = Some(cli_path.clone());
    }

    Ok(Box::new(ArduinoCli::from_config(&config.cli)?))
}
