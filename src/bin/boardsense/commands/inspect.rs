//! `boardsense inspect` command

use anyhow::{Context, Result};

use crate::cli::InspectArgs;
use crate::commands::property_source;
use boardsense::core::TargetContext;
use boardsense::ops::{inspect, ConfigureOptions, Synthesis};
use boardsense::util::fs::DiskFileSystem;
use boardsense::util::shell::{Shell, Status};

pub fn execute(args: InspectArgs, shell: &Shell) -> Result<()> {
    let workspace = match args.target.workspace {
        Some(ref root) => root.clone(),
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    let target = TargetContext::new(&args.target.fqbn).with_workspace(workspace);
    let source = property_source(&args.target, target.workspace_root().as_deref())?;

    let spinner = shell.spinner(
        Status::Fetching,
        format!("build properties for {}", target.fqbn()),
    );
    let result = inspect(&target, source.as_ref(), &ConfigureOptions::default(), &DiskFileSystem);
    spinner.finish();
    let synthesis = result?;

    if args.json {
        let entry = synthesis.config.to_entry();
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        print!("{}", format_report(&target, &synthesis));
    }

    Ok(())
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

fn format_report(target: &TargetContext, s: &Synthesis) -> String {
    let mut out = String::new();
    let config = &s.config;

    out.push_str(&format!("Board:          {}\n", target.fqbn()));
    out.push_str(&format!(
        "Analysis mode:  {} ({})\n",
        config.mode,
        config.mode.intellisense_mode()
    ));
    out.push_str(&format!("Platform:       {}\n", or_none(&s.paths.platform_path)));
    out.push_str(&format!("Core:           {}\n", or_none(&s.paths.core_path)));
    out.push_str(&format!("Variant:        {}\n", or_none(&s.paths.variant_path)));
    out.push_str(&format!("Compiler:       {}\n", or_none(&config.compiler_path)));
    out.push_str(&format!(
        "Forced include: {}\n",
        or_none(config.forced_include.first().map(String::as_str).unwrap_or(""))
    ));

    out.push_str("\nInclude path:\n");
    if config.include_path.is_empty() {
        out.push_str("  (none)\n");
    }
    for candidate in &config.include_path {
        out.push_str(&format!(
            "  {:<18} {}\n",
            candidate.origin.as_str(),
            candidate.entry()
        ));
    }

    out.push_str("\nDefines:\n");
    for define in &config.defines {
        out.push_str(&format!("  {}\n", define));
    }

    out
}
