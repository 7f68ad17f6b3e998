//! Interfaces shared by report renderers.

use std::io::Write;

use indiff_api::Report;

mod registry;
mod types;

pub use registry::RendererRegistry;
pub use types::{RenderError, RenderOptions, RenderResult, RendererSummary};

/// Trait implemented by output formats.
pub trait Renderer: Send + Sync {
    /// Stable identifier used for lookup, e.g. on the command line.
    fn id(&self) -> &'static str;

    /// Human-friendly label for help output.
    fn label(&self) -> &'static str;

    /// Write `report` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] when writing fails, or a renderer-defined
    /// failure when the report cannot be encoded.
    fn render(
        &self,
        report: &Report,
        options: &RenderOptions,
        out: &mut dyn Write,
    ) -> RenderResult<()>;
}
