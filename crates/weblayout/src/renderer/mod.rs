//! Layout renderer contracts and the guarded request-context adapter.

mod builtin;
mod func;
mod guarded;

pub use builtin::{
    RequestHeaderRenderer, RequestIdRenderer, RequestMethodRenderer, RequestUriRenderer,
};
pub use func::FnRenderer;
pub use guarded::{Guarded, Resolution};

use crate::context::RequestContext;
use crate::event::LogEvent;

/// One formatter in a composed log line.
///
/// This is the upward contract to the logging pipeline: `append` is invoked
/// synchronously during log formatting, possibly from many threads at once,
/// and must never panic or report an error upward. A renderer that cannot
/// produce its fragment leaves `buf` untouched.
pub trait LayoutRenderer: Send + Sync {
    /// Appends this renderer's fragment for `event` to `buf`.
    fn append(&self, buf: &mut String, event: &LogEvent);

    /// Lifecycle reset, called when the pipeline tears the renderer down.
    fn close(&self) {}
}

/// Concrete request-aware formatting behavior.
///
/// Implementations are only ever called with a live request context; the
/// [`Guarded`] wrapper owns that check.
pub trait ContextRenderer: Send + Sync {
    fn render(&self, buf: &mut String, event: &LogEvent, ctx: &RequestContext);

    /// Optional teardown hook, forwarded by [`Guarded`]'s close.
    fn on_close(&self) {}
}
