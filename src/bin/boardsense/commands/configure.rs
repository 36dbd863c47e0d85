//! `boardsense configure` command

use anyhow::{Context, Result};

use crate::cli::ConfigureArgs;
use crate::commands::property_source;
use boardsense::core::TargetContext;
use boardsense::ops::{configure, ConfigureOptions};
use boardsense::util::diagnostic::Fix;
use boardsense::util::fs::DiskFileSystem;
use boardsense::util::shell::{format_duration, Shell, Status};

pub fn execute(args: ConfigureArgs, shell: &Shell) -> Result<()> {
    let mut target = TargetContext::new(&args.target.fqbn);

    // The document's folder only stands in when no workspace is given.
    match (&args.target.workspace, &args.document) {
        (Some(root), _) => target = target.with_workspace(root),
        (None, Some(_)) => {}
        (None, None) => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            target = target.with_workspace(cwd);
        }
    }
    if let Some(ref document) = args.document {
        target = target.with_active_document(document);
    }

    // Nothing to configure and nothing to fetch.
    let Some(root) = target.workspace_root() else {
        if shell.is_verbose() {
            shell.note(format!("no workspace to configure; {}", Fix::NameWorkspace));
        }
        return Ok(());
    };
    let source = property_source(&args.target, Some(&root))?;

    let spinner = shell.spinner(
        Status::Fetching,
        format!("build properties for {}", target.fqbn()),
    );
    let result = configure(&target, source.as_ref(), &ConfigureOptions::default(), &DiskFileSystem);
    let elapsed = spinner.finish();

    let Some(report) = result? else {
        return Ok(());
    };

    shell.status(Status::Updated, report.descriptor_path.display());
    if report.settings_updated {
        shell.status(Status::Updated, report.settings_path.display());
    } else {
        shell.status(Status::Skipped, format!("{} (up to date)", report.settings_path.display()));
    }
    shell.status(
        Status::Configured,
        format!(
            "{} ({}, {} include paths) in {}",
            target.fqbn(),
            report.mode,
            report.synthesis.config.include_path.len(),
            format_duration(elapsed)
        ),
    );

    Ok(())
}
