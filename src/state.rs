//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::extract::Extractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    extractor: Extractor,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, db: SqlitePool, extractor: Extractor) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                extractor,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the extraction service
    pub fn extractor(&self) -> &Extractor {
        &self.inner.extractor
    }
}
