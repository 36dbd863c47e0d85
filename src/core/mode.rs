//! Analysis mode selection.
//!
//! The editor's code-intelligence engine only knows a handful of
//! width/calling-convention models. Boards are mapped onto the closest one
//! by an ordered rule table; the first matching rule wins.

use std::fmt;

/// Substrings identifying 32-bit embedded (ARM-class) targets.
pub const ARM_MARKERS: &[&str] = &["arm", "sam", "stm32", "nrf52", "rp2040", "mbed", "renesas"];

/// Substrings identifying 8-bit AVR targets.
pub const AVR_MARKERS: &[&str] = &["avr"];

/// Analysis model handed to the code-intelligence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisMode {
    /// 64-bit desktop GCC.
    GenericX64,
    /// 32-bit desktop GCC.
    GenericX86,
    /// 32-bit embedded ARM GCC.
    EmbeddedArm,
    /// 8-bit AVR, approximated by the narrowest available model.
    EmbeddedAvr,
}

impl AnalysisMode {
    /// Generic desktop mode matching the host's pointer width.
    pub fn host_default() -> Self {
        if cfg!(target_pointer_width = "64") {
            AnalysisMode::GenericX64
        } else {
            AnalysisMode::GenericX86
        }
    }

    /// Stable name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisMode::GenericX64 => "generic-x64",
            AnalysisMode::GenericX86 => "generic-x86",
            AnalysisMode::EmbeddedArm => "embedded-arm",
            AnalysisMode::EmbeddedAvr => "embedded-avr",
        }
    }

    /// Identifier written to `intelliSenseMode`.
    ///
    /// There is no AVR model, so AVR uses the 32-bit x86 one.
    pub fn intellisense_mode(&self) -> &'static str {
        match self {
            AnalysisMode::GenericX64 => "gcc-x64",
            AnalysisMode::GenericX86 => "gcc-x86",
            AnalysisMode::EmbeddedArm => "gcc-arm",
            AnalysisMode::EmbeddedAvr => "gcc-x86",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directory under which board packages install their compilers.
pub const TOOLS_DIR: &str = "/tools/";

/// Lowercased inputs the classification rules look at.
#[derive(Debug, Clone)]
pub struct TargetSignals {
    /// Value of `build.arch`.
    pub arch: String,
    /// Toolchain part of the compiler path (see [`toolchain_part`]).
    pub compiler: String,
}

impl TargetSignals {
    pub fn new(arch: &str, compiler: &str) -> Self {
        TargetSignals {
            arch: arch.to_lowercase(),
            compiler: toolchain_part(&compiler.to_lowercase()).to_string(),
        }
    }
}

/// The part of a compiler path that names the toolchain.
///
/// Everything after the last `/tools/` directory, or just the file name when
/// there is none. The install prefix (home folder, user name) never counts.
pub fn toolchain_part(compiler: &str) -> &str {
    match compiler.rfind(TOOLS_DIR) {
        Some(i) => &compiler[i + TOOLS_DIR.len()..],
        None => compiler.rsplit('/').next().unwrap_or(compiler),
    }
}

/// One row of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub mode: AnalysisMode,
    pub matches: fn(&TargetSignals) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("mode", &self.mode).finish()
    }
}

/// Classification rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        mode: AnalysisMode::EmbeddedArm,
        matches: is_arm,
    },
    Rule {
        mode: AnalysisMode::EmbeddedAvr,
        matches: is_avr,
    },
];

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack.contains(m))
}

fn is_arm(t: &TargetSignals) -> bool {
    contains_any(&t.arch, ARM_MARKERS) || contains_any(&t.compiler, ARM_MARKERS)
}

fn is_avr(t: &TargetSignals) -> bool {
    contains_any(&t.arch, AVR_MARKERS)
}

/// Pick the analysis mode for a target architecture and compiler path.
///
/// Architectures no rule recognizes (ESP32, RISC-V, ...) get the host's
/// generic desktop mode.
pub fn classify(arch: &str, compiler_path: &str) -> AnalysisMode {
    classify_with(RULES, &TargetSignals::new(arch, compiler_path))
}

/// Run an explicit rule table.
pub fn classify_with(rules: &[Rule], signals: &TargetSignals) -> AnalysisMode {
    let mode = rules
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map(|rule| rule.mode)
        .unwrap_or_else(AnalysisMode::host_default);

    tracing::debug!(arch = %signals.arch, compiler = %signals.compiler, %mode, "classified target");
    mode
}
