use crate::{PipevizError, RenderedGraph, Renderer, Toggles};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Memoizes [`Renderer::render`] by `(pattern name, toggles)`.
///
/// Lookup failures are not cached.
#[derive(Debug)]
pub struct RenderCache<'a> {
    renderer: Renderer<'a>,
    entries: Mutex<HashMap<(String, Toggles), Arc<RenderedGraph>>>,
}

impl<'a> RenderCache<'a> {
    pub fn new(renderer: Renderer<'a>) -> Self {
        Self {
            renderer,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn render(&self, name: &str, toggles: &Toggles) -> Result<Arc<RenderedGraph>, PipevizError> {
        let key = (name.to_string(), toggles.clone());
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let graph = Arc::new(self.renderer.render(name, toggles)?);
        // Two racing misses render the same value; keep whichever landed first.
        let entry = Arc::clone(self.lock().entry(key).or_insert(graph));
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, Toggles), Arc<RenderedGraph>>> {
        // The map holds only finished values, so a poisoned lock is still consistent.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
