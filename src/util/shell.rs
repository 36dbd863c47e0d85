//! Centralized shell output.
//!
//! Commands report progress through [`Shell`] rather than printing
//! directly, so verbosity and color handling live in one place. Status
//! lines go to stderr; command results (the `inspect` report) go to stdout.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, no spinner
    Quiet,
    /// Default: status messages and a spinner while waiting
    #[default]
    Normal,
    /// --verbose: status messages and debug logging, no spinner
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Updated,
    Configured,

    // In-progress statuses (cyan)
    Fetching,

    Info,

    // Warning statuses (yellow)
    Skipped,

    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Updated => "Updated",
            Status::Configured => "Configured",
            Status::Fetching => "Fetching",
            Status::Info => "Info",
            Status::Skipped => "Skipped",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Updated | Status::Configured => "\x1b[1;32m",
            Status::Fetching => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Skipped => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Width status labels are right-aligned to.
const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug, Clone)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags. `--quiet` wins over `--verbose`.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`. In quiet mode only errors are
    /// printed.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() && status != Status::Error {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    pub fn error(&self, msg: impl Display) {
        self.status(Status::Error, msg);
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }

    /// Start a spinner for a step of unknown length.
    ///
    /// The spinner is only drawn in normal verbosity on a terminal. In
    /// verbose mode the status line is printed up front instead.
    pub fn spinner(&self, status: Status, msg: impl Display) -> Spinner {
        let message = msg.to_string();
        let bar = if self.verbosity == Verbosity::Normal && io::stderr().is_terminal() {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(message.clone());
            pb.enable_steady_tick(Spinner::TICK);
            Some(pb)
        } else {
            if self.is_verbose() {
                self.status(status, &message);
            }
            None
        };

        Spinner {
            bar,
            start: Instant::now(),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal, ColorChoice::Auto)
    }
}

/// A running spinner. Cleared when finished or dropped.
pub struct Spinner {
    bar: Option<ProgressBar>,
    start: Instant,
}

impl Spinner {
    const TICK: Duration = Duration::from_millis(80);

    /// Stop the spinner and return the elapsed time.
    pub fn finish(mut self) -> Duration {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
        self.start.elapsed()
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}
