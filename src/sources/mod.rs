//! Property sources.
//!
//! A source produces the raw property dump for a board. The configuration
//! pipeline only consumes the text; how it is obtained (running arduino-cli,
//! reading a captured dump) lives behind [`PropertySource`].

pub mod arduino_cli;

use anyhow::Result;

use crate::core::TargetContext;

pub use arduino_cli::ArduinoCli;

/// Something that can produce the property dump for a target.
pub trait PropertySource {
    /// Short name used in log and error messages.
    fn name(&self) -> &str;

    /// Fetch the raw `key=value` dump for the target's board.
    fn fetch(&self, target: &TargetContext) -> Result<String>;
}

/// A property dump captured ahead of time.
#[derive(Debug, Clone)]
pub struct CapturedProperties {
    text: String,
}

impl CapturedProperties {
    pub fn new(text: impl Into<String>) -> Self {
        CapturedProperties { text: text.into() }
    }
}

impl PropertySource for CapturedProperties {
    fn name(&self) -> &str {
        "captured properties"
    }

    fn fetch(&self, _target: &TargetContext) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_returns_text_for_any_board() {
        let source = CapturedProperties::new("build.arch=avr\n");
        let ctx = TargetContext::new("arduino:samd:mkr1000");
        assert_eq!(source.fetch(&ctx).unwrap(), "build.arch=avr\n");
    }
}
