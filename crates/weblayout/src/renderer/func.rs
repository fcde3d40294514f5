//! Callback adapter for ad-hoc renderers.

use std::fmt::Display;
use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::context::RequestContext;
use crate::event::LogEvent;

use super::ContextRenderer;

type Callback = dyn Fn(&LogEvent, &RequestContext, &LayoutConfig) -> String + Send + Sync;

/// Turns a plain callback into a [`ContextRenderer`].
///
/// The callback receives the log event, the live request context, and the
/// active layout configuration; whatever it returns is appended as text.
pub struct FnRenderer {
    callback: Box<Callback>,
    config: Arc<LayoutConfig>,
}

impl FnRenderer {
    pub fn new<F, V>(callback: F, config: Arc<LayoutConfig>) -> Self
    where
        F: Fn(&LogEvent, &RequestContext, &LayoutConfig) -> V + Send + Sync + 'static,
        V: Display,
    {
        Self {
            callback: Box::new(move |event, ctx, config| callback(event, ctx, config).to_string()),
            config,
        }
    }
}

impl ContextRenderer for FnRenderer {
    fn render(&self, buf: &mut String, event: &LogEvent, ctx: &RequestContext) {
        buf.push_str(&(self.callback)(event, ctx, &self.config));
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, Method};
    use tracing::Level;

    use super::*;
    use crate::context::RequestId;

    #[test]
    fn test_callback_sees_event_context_and_config() {
        let config = Arc::new(LayoutConfig::new().with_option("separator", "|"));
        let renderer = FnRenderer::new(
            |event, ctx, config| {
                format!(
                    "{}{}{}",
                    event.target(),
                    config.get("separator").unwrap_or(" "),
                    ctx.method
                )
            },
            config,
        );

        let ctx = RequestContext::new(
            RequestId::new(),
            Method::GET,
            "/".parse().unwrap(),
            HeaderMap::new(),
        );
        let event = LogEvent::new(Level::INFO, "api", "message");

        let mut buf = String::new();
        renderer.render(&mut buf, &event, &ctx);

        assert_eq!(buf, "api|GET");
    }
}
