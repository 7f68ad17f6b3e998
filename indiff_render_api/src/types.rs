use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Presentation settings shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenderOptions {
    /// Directory paths are shown relative to.
    pub root: String,
    /// Show paths relative to `root` when they lie below it.
    pub relative_paths: bool,
    /// Print patches attached to modifications.
    pub show_patches: bool,
}

impl RenderOptions {
    /// Options showing paths relative to `root`, without patches.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            relative_paths: true,
            show_patches: false,
        }
    }

    /// Path as it should be displayed.
    #[must_use]
    pub fn display_path(&self, path: &str) -> String {
        if !self.relative_paths || self.root.is_empty() {
            return path.to_owned();
        }
        Utf8Path::new(path)
            .strip_prefix(&self.root)
            .map_or_else(|_| path.to_owned(), |relative| relative.as_str().to_owned())
    }
}

/// Identifier and label of a registered renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererSummary {
    /// Stable identifier.
    pub id: String,
    /// Human-friendly label.
    pub label: String,
}

/// Error type shared by renderers.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing the output failed.
    #[error("failed to write report: {source}")]
    Io {
        /// Source I/O error.
        #[from]
        source: std::io::Error,
    },
    /// Generic failure surfaced by a renderer.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl RenderError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for rendering.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
