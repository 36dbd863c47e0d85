//! High-level operations.
//!
//! This module contains the implementation of boardsense commands.

pub mod configure;
pub mod errors;
pub mod settings;

pub use configure::{
    configure, descriptor_path, inspect, settings_path, synthesize, ConfigureOptions,
    ConfigureReport, Synthesis,
};
pub use errors::ConfigureError;
