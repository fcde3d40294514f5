//! Pure types for request-scoped context.

use axum::http::{HeaderMap, Method, Uri};
use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of the current request, shared with layout renderers.
///
/// Built once per request (by the middleware or by whoever establishes the
/// ambient scope) and never mutated afterwards. Renderers hold it behind an
/// `Arc`, so cloning the handle is cheap and concurrent reads are safe.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request identifier for correlating log lines.
    pub request_id: RequestId,
    /// HTTP method of the current request.
    pub method: Method,
    /// Full request URI.
    pub uri: Uri,
    /// Request headers as received.
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn new(request_id: RequestId, method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            request_id,
            method,
            uri,
            headers,
        }
    }

    /// Returns a header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
