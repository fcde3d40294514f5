//! Axum middleware that establishes the ambient request context.

use std::sync::Arc;

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use uuid::Uuid;

use super::accessor::scope_shared;
use super::types::{RequestContext, RequestId};

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn snapshot(request: &Request) -> RequestContext {
    RequestContext::new(
        extract_request_id(request.headers()),
        request.method().clone(),
        request.uri().clone(),
        request.headers().clone(),
    )
}

/// Snapshots the incoming request and scopes it as the ambient context for
/// the rest of the request's processing.
///
/// Install with `axum::middleware::from_fn(provide_request_context)`. Any
/// renderer using the default ambient accessor sees the context from inside
/// handlers and everything they await.
pub async fn provide_request_context(request: Request, next: Next) -> Response {
    let ctx = Arc::new(snapshot(&request));
    scope_shared(ctx, next.run(request)).await
}
