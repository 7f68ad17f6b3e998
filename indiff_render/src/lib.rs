//! Builtin output formats.

mod json;
mod plain;

pub use json::JsonRenderer;
pub use plain::PlainRenderer;

use indiff_render_api::RendererRegistry;

/// Identifier of the renderer used when none is requested.
pub const DEFAULT_RENDERER: &str = "plain";

/// Build a registry populated with every builtin renderer.
#[must_use]
pub fn default_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    registry.register(PlainRenderer);
    registry.register(JsonRenderer);
    registry
}
