//! Per-invocation target context.

use std::path::{Path, PathBuf};

/// Inputs of one "board selected" event.
///
/// Built once per invocation and passed down explicitly; nothing about the
/// selected board is kept anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetContext {
    fqbn: String,
    workspace_root: Option<PathBuf>,
    active_document: Option<PathBuf>,
}

impl TargetContext {
    /// Create a context for a fully-qualified board name.
    pub fn new(fqbn: impl Into<String>) -> Self {
        TargetContext {
            fqbn: fqbn.into(),
            workspace_root: None,
            active_document: None,
        }
    }

    /// Set the open workspace folder.
    pub fn with_workspace(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Set the document active in the editor.
    pub fn with_active_document(mut self, document: impl Into<PathBuf>) -> Self {
        self.active_document = Some(document.into());
        self
    }

    /// The fully-qualified board name.
    pub fn fqbn(&self) -> &str {
        &self.fqbn
    }

    /// The active document, if any.
    pub fn active_document(&self) -> Option<&Path> {
        self.active_document.as_deref()
    }

    /// Directory the configuration is written into.
    ///
    /// The workspace folder if one is open, else the active document's
    /// directory, else nothing.
    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.clone().or_else(|| {
            self.active_document
                .as_deref()
                .and_then(Path::parent)
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_preferred() {
        let ctx = TargetContext::new("arduino:avr:uno")
            .with_workspace("/work")
            .with_active_document("/elsewhere/sketch.ino");
        assert_eq!(ctx.workspace_root(), Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_document_parent_fallback() {
        let ctx = TargetContext::new("arduino:avr:uno").with_active_document("/sketches/blink/blink.ino");
        assert_eq!(ctx.workspace_root(), Some(PathBuf::from("/sketches/blink")));
    }

    #[test]
    fn test_no_root() {
        let ctx = TargetContext::new("arduino:avr:uno");
        assert_eq!(ctx.workspace_root(), None);

        let bare = TargetContext::new("arduino:avr:uno").with_active_document("blink.ino");
        assert_eq!(bare.workspace_root(), None);
    }
}
