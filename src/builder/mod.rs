//! Configuration synthesis stages.
//!
//! - [`toolchain`] discovers system include directories under the compiler
//!   install root.
//! - [`include`] generates include path candidates and drops missing ones.
//! - [`descriptor`] assembles and renders the analysis configuration.

pub mod descriptor;
pub mod include;
pub mod toolchain;

pub use descriptor::AnalysisConfig;
pub use include::{IncludeCandidate, RECURSIVE_MARKER};
pub use toolchain::ToolchainIncludeSet;
