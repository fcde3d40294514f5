//! Service-provider contract for dependency-injection hosting.
//!
//! Hosts that wire the context accessor through a container implement
//! [`ServiceProvider`] and register it in a [`Services`] handle, which is
//! passed to renderers at construction time. There is no process-global
//! locator: whoever builds the renderers decides which handle they read.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::context::ContextAccessor;

/// Expected, non-exceptional reasons a provider cannot supply the accessor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Service provider has been disposed")]
    Disposed,
    #[error("Context accessor is not registered")]
    NotRegistered,
}

/// Result type for provider resolution.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// A dependency-injection container queried for the context accessor.
pub trait ServiceProvider: Send + Sync {
    /// Resolves the context accessor capability.
    fn context_accessor(&self) -> Result<Arc<dyn ContextAccessor>>;
}

/// Cloneable handle to an optionally registered [`ServiceProvider`].
///
/// The slot may be set, swapped, or cleared at any time; renderers read it
/// on every resolution attempt, so a late registration is picked up on the
/// next append without any coordination.
#[derive(Clone, Default)]
pub struct Services {
    provider: Arc<RwLock<Option<Arc<dyn ServiceProvider>>>>,
}

impl Services {
    /// Creates a handle with no provider registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the provider.
    pub fn set_provider(&self, provider: Arc<dyn ServiceProvider>) {
        *self.provider.write().unwrap_or_else(|e| e.into_inner()) = Some(provider);
    }

    /// Removes the registered provider, if any.
    pub fn clear_provider(&self) {
        *self.provider.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub(crate) fn provider(&self) -> Option<Arc<dyn ServiceProvider>> {
        self.provider
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("registered", &self.provider().is_some())
            .finish()
    }
}
