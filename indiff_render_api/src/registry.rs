//! Renderer registry keyed by identifier.

use std::collections::HashMap;

use crate::{Renderer, RendererSummary};

/// In-memory registry of output formats.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<&'static str, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer keyed by its [`Renderer::id`], replacing any previous one.
    pub fn register<R>(&mut self, renderer: R)
    where
        R: Renderer + 'static,
    {
        self.renderers.insert(renderer.id(), Box::new(renderer));
    }

    /// Retrieve a renderer by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Renderer> {
        self.renderers.get(id).map(|renderer| renderer.as_ref())
    }

    /// Registered identifiers in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.renderers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Identifier and label of every renderer, sorted by identifier.
    #[must_use]
    pub fn summaries(&self) -> Vec<RendererSummary> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.get(id))
            .map(|renderer| RendererSummary {
                id: renderer.id().to_owned(),
                label: renderer.label().to_owned(),
            })
            .collect()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.ids())
            .finish()
    }
}
