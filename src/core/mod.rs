//! Core data types: property dumps, resolved paths, analysis modes.

pub mod context;
pub mod mode;
pub mod paths;
pub mod properties;

pub use context::TargetContext;
pub use mode::{classify, AnalysisMode};
pub use paths::ResolvedPaths;
pub use properties::BuildPropertySet;
