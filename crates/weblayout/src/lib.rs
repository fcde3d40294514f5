//! Request-context-aware layout renderers.
//!
//! This crate is the glue between a log formatting pipeline and an axum web
//! host: layout renderers (small formatters that each produce one fragment of
//! a log line) get access to the current request's context without the
//! logging side depending on the web framework.
//!
//! It provides:
//! - A [`ContextAccessor`] capability for reading the ambient request
//!   context, with axum middleware to establish it per request
//! - The [`Guarded`] adapter that resolves an accessor lazily and only
//!   invokes concrete formatting when a live request context exists
//! - A [`LayoutRegistry`] with a callback-based registration hook for
//!   ad-hoc renderers
//!
//! Every failure mode (no provider, provider disposed, accessor missing, no
//! live request) degrades to a silent no-op with a debug diagnostic, so a
//! broken renderer can never break application logging.

mod config;
mod context;
mod event;
mod provider;
mod registry;
mod renderer;

pub use config::LayoutConfig;
pub use context::{
    default_accessor, provide_request_context, scope, AmbientAccessor, ContextAccessor,
    RequestContext, RequestId,
};
pub use event::LogEvent;
pub use provider::{ProviderError, ServiceProvider, Services};
pub use registry::LayoutRegistry;
pub use renderer::{
    ContextRenderer, FnRenderer, Guarded, LayoutRenderer, RequestHeaderRenderer,
    RequestIdRenderer, RequestMethodRenderer, RequestUriRenderer, Resolution,
};
