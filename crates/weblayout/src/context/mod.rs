//! Request-scoped context module.
//!
//! Provides the `RequestContext` snapshot shared with layout renderers, the
//! `ContextAccessor` capability for reading the ambient context, and the axum
//! middleware that establishes it per request.

mod accessor;
mod middleware;
mod types;

pub use accessor::{default_accessor, scope, AmbientAccessor, ContextAccessor};
pub use middleware::provide_request_context;
pub use types::{RequestContext, RequestId};
