//! boardsense - editor code-intelligence configuration for Arduino sketches
//!
//! This crate turns the build properties arduino-cli reports for a board
//! into a `c_cpp_properties.json` descriptor: resolved core and variant
//! paths, scanned toolchain system includes, preprocessor defines and an
//! analysis mode. It also keeps the workspace's editor settings in step.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for boardsense unit tests.
///
/// Only compiled for tests. Provides an in-memory [`util::fs::FileSystem`] and
/// board platform fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{AnalysisMode, BuildPropertySet, ResolvedPaths, TargetContext};
pub use builder::AnalysisConfig;
pub use ops::{configure, inspect, ConfigureError, ConfigureOptions, ConfigureReport};
pub use sources::{ArduinoCli, CapturedProperties, PropertySource};
