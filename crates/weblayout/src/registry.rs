//! Named renderer registry and the ad-hoc registration hook.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

use crate::config::LayoutConfig;
use crate::context::RequestContext;
use crate::event::LogEvent;
use crate::provider::Services;
use crate::renderer::{FnRenderer, Guarded, LayoutRenderer};

/// Name-to-renderer registry for a layout pipeline.
///
/// A value owned by the host, not a process global. Duplicate registrations
/// overwrite: the last one wins, and whether that is acceptable is the
/// caller's policy, not the adapter's.
pub struct LayoutRegistry {
    config: Arc<LayoutConfig>,
    services: Option<Services>,
    renderers: RwLock<HashMap<String, Arc<dyn LayoutRenderer>>>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutRegistry {
    /// Standalone-hosting registry: renderers registered here resolve the
    /// process-wide ambient accessor.
    pub fn new() -> Self {
        Self::build(LayoutConfig::default(), None)
    }

    /// Registry whose renderers resolve through the given [`Services`] handle.
    pub fn with_services(services: Services) -> Self {
        Self::build(LayoutConfig::default(), Some(services))
    }

    /// Replaces the active configuration handed to registered callbacks.
    ///
    /// Only affects renderers registered after the call.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    fn build(config: LayoutConfig, services: Option<Services>) -> Self {
        Self {
            config: Arc::new(config),
            services,
            renderers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a custom renderer under `name` from a plain callback.
    ///
    /// The callback receives the log event, the live request context, and the
    /// active configuration, and returns any displayable value. It is wrapped
    /// with the same guard as every other renderer: without a live request
    /// context it appends nothing.
    pub fn register<F, V>(&self, name: impl Into<String>, callback: F)
    where
        F: Fn(&LogEvent, &RequestContext, &LayoutConfig) -> V + Send + Sync + 'static,
        V: Display,
    {
        let renderer = FnRenderer::new(callback, self.config.clone());
        let guarded: Arc<dyn LayoutRenderer> = match &self.services {
            Some(services) => Arc::new(Guarded::with_services(renderer, services.clone())),
            None => Arc::new(Guarded::new(renderer)),
        };
        self.register_renderer(name, guarded);
    }

    /// Registers a prebuilt renderer under `name`.
    pub fn register_renderer(&self, name: impl Into<String>, renderer: Arc<dyn LayoutRenderer>) {
        self.renderers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), renderer);
    }

    /// Looks up a renderer by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn LayoutRenderer>> {
        self.renderers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Appends the named renderer's fragment to `buf`.
    ///
    /// Returns `false` when no renderer is registered under `name`; the
    /// buffer is left untouched in that case.
    pub fn append_to(&self, name: &str, buf: &mut String, event: &LogEvent) -> bool {
        match self.get(name) {
            Some(renderer) => {
                renderer.append(buf, event);
                true
            }
            None => false,
        }
    }

    /// Forwards lifecycle teardown to every registered renderer.
    pub fn close_all(&self) {
        let renderers = self.renderers.read().unwrap_or_else(|e| e.into_inner());
        for renderer in renderers.values() {
            renderer.close();
        }
    }
}
