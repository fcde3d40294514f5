//! Built-in request-aware renderers.

use std::fmt::Write;

use crate::context::RequestContext;
use crate::event::LogEvent;

use super::ContextRenderer;

/// Appends the current request's id.
#[derive(Debug, Default)]
pub struct RequestIdRenderer;

impl ContextRenderer for RequestIdRenderer {
    fn render(&self, buf: &mut String, _event: &LogEvent, ctx: &RequestContext) {
        let _ = write!(buf, "{}", ctx.request_id);
    }
}

/// Appends the current request's HTTP method.
#[derive(Debug, Default)]
pub struct RequestMethodRenderer;

impl ContextRenderer for RequestMethodRenderer {
    fn render(&self, buf: &mut String, _event: &LogEvent, ctx: &RequestContext) {
        buf.push_str(ctx.method.as_str());
    }
}

/// Appends the current request's URI.
#[derive(Debug, Default)]
pub struct RequestUriRenderer;

impl ContextRenderer for RequestUriRenderer {
    fn render(&self, buf: &mut String, _event: &LogEvent, ctx: &RequestContext) {
        let _ = write!(buf, "{}", ctx.uri);
    }
}

/// Appends the value of a single request header, or nothing if absent.
#[derive(Debug)]
pub struct RequestHeaderRenderer {
    name: String,
}

impl RequestHeaderRenderer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ContextRenderer for RequestHeaderRenderer {
    fn render(&self, buf: &mut String, _event: &LogEvent, ctx: &RequestContext) {
        if let Some(value) = ctx.header(&self.name) {
            buf.push_str(value);
        }
    }
}
