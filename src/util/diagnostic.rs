//! Terminal error reports.
//!
//! A [`Report`] is a headline, the facts behind it, anything the property
//! tool printed, and the fixes worth trying next.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

/// A remedy offered at the bottom of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fix {
    /// The board package is probably not installed.
    InstallCore,
    /// Skip arduino-cli and hand over a captured dump.
    CapturedProperties,
    /// settings.json has to be repaired by hand.
    RepairSettings,
    /// No folder could be chosen as the workspace.
    NameWorkspace,
}

impl Fix {
    pub fn as_str(self) -> &'static str {
        match self {
            Fix::InstallCore => "install the board package: `arduino-cli core install <vendor>:<arch>`",
            Fix::CapturedProperties => {
                "save the dump of `arduino-cli compile --show-properties` and pass it with `--properties <file>`"
            }
            Fix::RepairSettings => {
                "remove comments and trailing commas from .vscode/settings.json, or delete it"
            }
            Fix::NameWorkspace => "pass --workspace <dir>, or a --document path that has a folder",
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Detail {
    Fact(String),
    ToolOutput(String),
}

/// An error report for the user.
#[derive(Debug, Clone)]
pub struct Report {
    headline: String,
    file: Option<PathBuf>,
    details: Vec<Detail>,
    fixes: Vec<Fix>,
}

impl Report {
    pub fn error(headline: impl Into<String>) -> Self {
        Report {
            headline: headline.into(),
            file: None,
            details: Vec::new(),
            fixes: Vec::new(),
        }
    }

    /// The file the report is about.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn fact(mut self, fact: impl Into<String>) -> Self {
        self.details.push(Detail::Fact(fact.into()));
        self
    }

    /// Attach what an external tool printed. Blank lines are dropped.
    pub fn tool_output(mut self, output: &str) -> Self {
        self.details.extend(
            output
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| Detail::ToolOutput(l.to_string())),
        );
        self
    }

    pub fn fix(mut self, fix: Fix) -> Self {
        if !self.fixes.contains(&fix) {
            self.fixes.push(fix);
        }
        self
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", paint("1;31", "error"), self.headline);
        if let Some(ref file) = self.file {
            let _ = writeln!(out, "  in {}", file.display());
        }
        for detail in &self.details {
            let _ = match detail {
                Detail::Fact(text) => writeln!(out, "  {}", text),
                Detail::ToolOutput(text) => writeln!(out, "  {} {}", paint("2", "|"), text),
            };
        }
        for fix in &self.fixes {
            let _ = writeln!(out, "{}: {}", paint("1;32", "try"), fix);
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print a report to stderr.
pub fn emit(report: &Report, color: bool) {
    eprint!("{}", report.render(color));
}
