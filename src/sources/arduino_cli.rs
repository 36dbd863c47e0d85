//! arduino-cli property source.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::TargetContext;
use crate::sources::PropertySource;
use crate::util::config::CliConfig;
use crate::util::process::ProcessBuilder;

/// Runs `arduino-cli compile --show-properties` for the selected board.
#[derive(Debug, Clone)]
pub struct ArduinoCli {
    program: PathBuf,
    config_file: Option<PathBuf>,
    extra_args: Vec<String>,
}

impl ArduinoCli {
    /// Create a source for the given arduino-cli binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ArduinoCli {
            program: program.into(),
            config_file: None,
            extra_args: Vec::new(),
        }
    }

    /// Build a source from configuration, locating the binary.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let program = config.program().ok_or_else(|| {
            anyhow!(
                "arduino-cli not found\n\
                 help: install arduino-cli, set `cli.path` in .boardsense/config.toml, \
                 or pass a captured dump with --properties"
            )
        })?;

        Ok(ArduinoCli {
            program,
            config_file: config.config_file.clone(),
            extra_args: config.extra_args.clone(),
        })
    }

    /// Pass `--config-file` to every invocation.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Append extra arguments to every invocation.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The property query for a target.
    ///
    /// arduino-cli needs a sketch directory; the workspace root is used when
    /// there is one.
    pub fn command(&self, target: &TargetContext) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.program).args([
            "compile",
            "--fqbn",
            target.fqbn(),
            "--show-properties",
        ]);

        if let Some(ref config_file) = self.config_file {
            cmd = cmd.arg("--config-file").arg(config_file);
        }
        cmd = cmd.args(&self.extra_args);

        if let Some(root) = target.workspace_root() {
            cmd = cmd.arg(&root).cwd(&root);
        }

        cmd
    }
}

impl PropertySource for ArduinoCli {
    fn name(&self) -> &str {
        "arduino-cli"
    }

    fn fetch(&self, target: &TargetContext) -> Result<String> {
        let output = self.command(target).exec_and_check()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let cli = ArduinoCli::new("/usr/bin/arduino-cli")
            .with_config_file("/etc/arduino-cli.yaml")
            .with_args(["--log-level", "warn"]);
        let ctx = TargetContext::new("arduino:avr:uno").with_workspace("/work/blink");

        assert_eq!(
            cli.command(&ctx).display_command(),
            "/usr/bin/arduino-cli compile --fqbn arduino:avr:uno --show-properties \
             --config-file /etc/arduino-cli.yaml --log-level warn /work/blink"
        );
    }

    #[test]
    fn test_command_without_workspace() {
        let cli = ArduinoCli::new("arduino-cli");
        let ctx = TargetContext::new("esp32:esp32:esp32");

        assert_eq!(
            cli.command(&ctx).get_args(),
            &["compile", "--fqbn", "esp32:esp32:esp32", "--show-properties"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fetch_failure_carries_stderr() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("fake-cli");
        std::fs::write(&script, "#!/bin/sh\necho 'Error: unknown board' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = ArduinoCli::new(&script)
            .fetch(&TargetContext::new("nope:nope:nope"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("unknown board"));
    }

    #[cfg(unix)]
    #[test]
    fn test_fetch_returns_stdout() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("fake-cli");
        std::fs::write(&script, "#!/bin/sh\necho 'build.arch=avr'\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let text = ArduinoCli::new(&script)
            .fetch(&TargetContext::new("arduino:avr:uno"))
            .unwrap();
        assert_eq!(text.trim(), "build.arch=avr");
    }
}
