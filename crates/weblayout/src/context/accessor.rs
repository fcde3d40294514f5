//! Access to the ambient current-request context.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use super::types::RequestContext;

tokio::task_local! {
    static CURRENT_CONTEXT: Arc<RequestContext>;
}

/// Capability for retrieving the current request's ambient context, if any.
///
/// Queried fresh on every render call. Implementations must be
/// side-effect-free and safe for concurrent reads, since concurrent log calls
/// may share a single accessor.
pub trait ContextAccessor: Send + Sync {
    /// Returns the live request context, or `None` outside a request scope.
    fn current(&self) -> Option<Arc<RequestContext>>;
}

/// Accessor backed by the crate's task-local request slot.
///
/// This is the standalone-hosting default: the middleware (or [`scope`])
/// installs the context for the duration of a request, and this accessor
/// reads it back from whatever task the log call runs on.
#[derive(Debug, Default)]
pub struct AmbientAccessor;

impl ContextAccessor for AmbientAccessor {
    fn current(&self) -> Option<Arc<RequestContext>> {
        CURRENT_CONTEXT.try_with(Arc::clone).ok()
    }
}

/// Process-wide default accessor, lazily constructed once and shared.
pub fn default_accessor() -> Arc<dyn ContextAccessor> {
    static DEFAULT: OnceLock<Arc<AmbientAccessor>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(AmbientAccessor)).clone()
}

/// Runs `fut` with `ctx` installed as the ambient current request context.
///
/// Hosts that don't go through the axum middleware can use this to make a
/// context visible to ambient-accessor renderers.
pub async fn scope<F>(ctx: RequestContext, fut: F) -> F::Output
where
    F: Future,
{
    scope_shared(Arc::new(ctx), fut).await
}

pub(crate) async fn scope_shared<F>(ctx: Arc<RequestContext>, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_CONTEXT.scope(ctx, fut).await
}
