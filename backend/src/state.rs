//! Application state management
//!
//! Bundles the document store and configuration that every engine call
//! needs. Cloning is cheap: both fields are behind `Arc`.

use crate::config::{AppConfig, StoreBackend};
use crate::store::memory::InMemoryStore;
use crate::store::DocumentStore;
use fitplan_shared::EnginePolicy;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Build the store selected by `config.store.backend`
    pub fn from_config(config: AppConfig) -> Self {
        let store: Arc<dyn DocumentStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        };
        Self::new(store, config)
    }

    #[inline]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn policy(&self) -> &EnginePolicy {
        &self.config.policy
    }
}
