//! Application state shared across handlers.

use std::sync::Arc;

use byttech_core::catalog::{self, Product};
use chrono::Utc;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The demo catalog is
/// generated once at startup and never mutated, so handlers borrow it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Vec<Product>,
}

impl AppState {
    /// Create a new application state, generating the demo catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = catalog::generate(config.catalog_size, Utc::now());
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the generated product catalog.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.inner.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_generates_the_configured_catalog() {
        let config = StorefrontConfig {
            catalog_size: 15,
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.catalog().len(), 15);
        assert_eq!(state.config().catalog_size, 15);
    }
}
