//! Shared application state.

use std::sync::Arc;

use bytes::Bytes;
use cardcraft_core::{CardStore, MemoryStorage, TemplateCatalog};
use dashmap::DashMap;

use crate::config::Config;

/// An uploaded image held in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub templates: Arc<TemplateCatalog>,
    /// Uploaded images keyed by file name.
    pub uploads: Arc<DashMap<String, Upload>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by an in-memory store, seeded when `config.sample_data` is set.
    pub fn new(config: Config) -> Self {
        let store = if config.sample_data {
            MemoryStorage::with_sample_data()
        } else {
            MemoryStorage::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: Arc<dyn CardStore>) -> Self {
        Self {
            store,
            templates: Arc::new(TemplateCatalog::builtin()),
            uploads: Arc::new(DashMap::new()),
            config: Arc::new(config),
        }
    }
}
