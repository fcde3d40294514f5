//! The log event value handed to layout renderers.

use chrono::{DateTime, Utc};
use tracing::Level;

/// One logging occurrence, as seen by layout renderers.
///
/// Owned by the logging pipeline and passed in by reference; renderers never
/// mutate it.
#[derive(Debug, Clone)]
pub struct LogEvent {
    level: Level,
    target: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Logger name that emitted the event.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
