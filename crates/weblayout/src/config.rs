//! Active layout configuration handed to registered callbacks.

use std::collections::HashMap;

/// Named string options for the layout pipeline.
///
/// Callbacks registered through the registry receive this alongside the log
/// event and request context; built-in renderers don't read it.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    options: HashMap<String, String>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lookup() {
        let config = LayoutConfig::new().with_option("separator", "|");
        assert_eq!(config.get("separator"), Some("|"));
        assert_eq!(config.get("missing"), None);
    }
}
