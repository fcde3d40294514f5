//! Guarded adapter: resolve the context accessor lazily, render only when a
//! live request context exists, and degrade to a silent no-op otherwise.

use std::sync::{Arc, RwLock};

use crate::context::{default_accessor, ContextAccessor};
use crate::event::LogEvent;
use crate::provider::Services;

use super::{ContextRenderer, LayoutRenderer};

/// Resolver cache state for one renderer instance.
///
/// An absent resolution outcome is deliberately not a state of its own:
/// staying `Unresolved` makes every later append re-attempt resolution, which
/// tolerates a provider registered after the renderer was built.
#[derive(Clone, Default)]
pub enum Resolution {
    /// No accessor resolved yet; the next append re-attempts resolution.
    #[default]
    Unresolved,
    /// Accessor resolved and cached until the renderer is closed.
    Resolved(Arc<dyn ContextAccessor>),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Unresolved => f.write_str("Unresolved"),
            Resolution::Resolved(_) => f.write_str("Resolved"),
        }
    }
}

/// Wraps a [`ContextRenderer`] with the request-context guard.
///
/// On every append the guard is evaluated fresh: resolve an accessor (cached
/// after the first success), confirm a live context, then delegate. Each
/// failing branch logs one debug diagnostic and leaves the buffer untouched;
/// nothing here ever propagates an error into the logging pipeline.
pub struct Guarded<R> {
    inner: R,
    services: Option<Services>,
    accessor: RwLock<Resolution>,
}

impl<R: ContextRenderer> Guarded<R> {
    /// Standalone hosting: resolve the process-wide ambient accessor.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            services: None,
            accessor: RwLock::new(Resolution::Unresolved),
        }
    }

    /// DI hosting: resolve the accessor through the given [`Services`] handle.
    pub fn with_services(inner: R, services: Services) -> Self {
        Self {
            inner,
            services: Some(services),
            accessor: RwLock::new(Resolution::Unresolved),
        }
    }

    /// Current resolver cache state.
    pub fn resolution(&self) -> Resolution {
        self.accessor
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn resolve(&self) -> Option<Arc<dyn ContextAccessor>> {
        if let Resolution::Resolved(accessor) =
            &*self.accessor.read().unwrap_or_else(|e| e.into_inner())
        {
            return Some(accessor.clone());
        }

        let resolved = match &self.services {
            None => default_accessor(),
            Some(services) => {
                let Some(provider) = services.provider() else {
                    tracing::debug!(
                        "No available request context, because no service provider is registered"
                    );
                    return None;
                };
                match provider.context_accessor() {
                    Ok(accessor) => accessor,
                    Err(err) => {
                        tracing::debug!(error = %err, "No available request context");
                        return None;
                    }
                }
            }
        };

        // Two appends may race to get here; both resolve identically, so the
        // last write wins harmlessly.
        *self.accessor.write().unwrap_or_else(|e| e.into_inner()) =
            Resolution::Resolved(resolved.clone());
        Some(resolved)
    }
}

impl<R: ContextRenderer> LayoutRenderer for Guarded<R> {
    fn append(&self, buf: &mut String, event: &LogEvent) {
        let Some(accessor) = self.resolve() else {
            return;
        };

        // Liveness is never memoized; it changes per request.
        let Some(ctx) = accessor.current() else {
            tracing::debug!(
                logger = event.target(),
                "No available request context, because outside a live request"
            );
            return;
        };

        self.inner.render(buf, event, &ctx);
    }

    fn close(&self) {
        *self.accessor.write().unwrap_or_else(|e| e.into_inner()) = Resolution::Unresolved;
        self.inner.on_close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::{HeaderMap, Method};
    use tracing::Level;

    use super::*;
    use crate::context::{RequestContext, RequestId};
    use crate::provider::{ProviderError, ServiceProvider};

    /// Appends a fixed marker; the simplest concrete renderer.
    struct StaticRenderer(&'static str);

    impl ContextRenderer for StaticRenderer {
        fn render(&self, buf: &mut String, _event: &LogEvent, _ctx: &RequestContext) {
            buf.push_str(self.0);
        }
    }

    /// Accessor that always reports the same context (or none).
    struct FixedAccessor(Option<Arc<RequestContext>>);

    impl ContextAccessor for FixedAccessor {
        fn current(&self) -> Option<Arc<RequestContext>> {
            self.0.clone()
        }
    }

    /// Provider that counts how often it is queried.
    struct CountingProvider {
        calls: AtomicUsize,
        result: fn() -> crate::provider::Result<Arc<dyn ContextAccessor>>,
    }

    impl CountingProvider {
        fn new(result: fn() -> crate::provider::Result<Arc<dyn ContextAccessor>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result,
            }
        }
    }

    impl ServiceProvider for CountingProvider {
        fn context_accessor(&self) -> crate::provider::Result<Arc<dyn ContextAccessor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn test_context(path: &str) -> Arc<RequestContext> {
        Arc::new(RequestContext::new(
            RequestId::new(),
            Method::GET,
            path.parse().unwrap(),
            HeaderMap::new(),
        ))
    }

    fn test_event() -> LogEvent {
        LogEvent::new(Level::INFO, "test", "message")
    }

    fn live_provider(path: &'static str) -> Arc<dyn ServiceProvider> {
        struct LiveProvider(Arc<RequestContext>);

        impl ServiceProvider for LiveProvider {
            fn context_accessor(&self) -> crate::provider::Result<Arc<dyn ContextAccessor>> {
                Ok(Arc::new(FixedAccessor(Some(self.0.clone()))))
            }
        }

        Arc::new(LiveProvider(test_context(path)))
    }

    #[test]
    fn test_no_provider_leaves_buffer_unchanged() {
        let renderer = Guarded::with_services(StaticRenderer("X"), Services::new());

        let mut buf = String::from("prefix");
        renderer.append(&mut buf, &test_event());
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, "prefix");
        assert!(!renderer.resolution().is_resolved());
    }

    #[test]
    fn test_accessor_not_registered_is_noop_and_retried() {
        let services = Services::new();
        let provider = Arc::new(CountingProvider::new(|| Err(ProviderError::NotRegistered)));
        services.set_provider(provider.clone());

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, "");
        // Absent outcomes are not cached, so every append re-queries.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disposed_provider_is_noop() {
        let services = Services::new();
        services.set_provider(Arc::new(CountingProvider::new(|| {
            Err(ProviderError::Disposed)
        })));

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, "");
    }

    #[test]
    fn test_live_context_appends_exactly_once() {
        let services = Services::new();
        services.set_provider(live_provider("/a"));

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::from(">");
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, ">X");
        assert!(renderer.resolution().is_resolved());
    }

    #[test]
    fn test_append_is_idempotent_across_calls() {
        let services = Services::new();
        services.set_provider(live_provider("/a"));

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, "XX");
    }

    #[test]
    fn test_no_live_context_is_noop_without_uncaching() {
        let services = Services::new();

        struct DeadProvider;
        impl ServiceProvider for DeadProvider {
            fn context_accessor(&self) -> crate::provider::Result<Arc<dyn ContextAccessor>> {
                Ok(Arc::new(FixedAccessor(None)))
            }
        }
        services.set_provider(Arc::new(DeadProvider));

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());

        assert_eq!(buf, "");
        // The accessor itself resolved fine; only liveness failed.
        assert!(renderer.resolution().is_resolved());
    }

    #[test]
    fn test_successful_resolution_queries_provider_once() {
        let services = Services::new();
        let provider = Arc::new(CountingProvider::new(|| {
            Ok(Arc::new(FixedAccessor(None)) as Arc<dyn ContextAccessor>)
        }));
        services.set_provider(provider.clone());

        let renderer = Guarded::with_services(StaticRenderer("X"), services);

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());
        renderer.append(&mut buf, &test_event());

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_forces_reresolution_through_swapped_provider() {
        struct PathRenderer;
        impl ContextRenderer for PathRenderer {
            fn render(&self, buf: &mut String, _event: &LogEvent, ctx: &RequestContext) {
                buf.push_str(ctx.uri.path());
            }
        }

        let services = Services::new();
        services.set_provider(live_provider("/old"));

        let renderer = Guarded::with_services(PathRenderer, services.clone());

        let mut buf = String::new();
        renderer.append(&mut buf, &test_event());
        assert_eq!(buf, "/old");

        // Swapping the provider alone doesn't drop the cached accessor.
        services.set_provider(live_provider("/new"));
        renderer.append(&mut buf, &test_event());
        assert_eq!(buf, "/old/old");

        // Closing does.
        renderer.close();
        assert!(!renderer.resolution().is_resolved());

        renderer.append(&mut buf, &test_event());
        assert_eq!(buf, "/old/old/new");
    }

    #[test]
    fn test_close_forwards_to_inner() {
        struct ClosableRenderer(Arc<AtomicUsize>);
        impl ContextRenderer for ClosableRenderer {
            fn render(&self, _buf: &mut String, _event: &LogEvent, _ctx: &RequestContext) {}
            fn on_close(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let closed = Arc::new(AtomicUsize::new(0));
        let renderer = Guarded::new(ClosableRenderer(closed.clone()));

        renderer.close();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
