//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::BlogRepository;
use folio_infra::InMemoryBlogRepository;

#[cfg(feature = "postgres")]
use folio_infra::{DatabaseConfig, DatabaseConnections, PostgresBlogRepository};

use crate::config::{AppConfig, BlogSettings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub settings: BlogSettings,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// The database pool is not opened here; the first request that touches
    /// the store creates it.
    pub fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(settings) = &config.database {
                let db_config = DatabaseConfig {
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                    ..DatabaseConfig::new(&settings.url)
                };
                let connections = Arc::new(DatabaseConnections::lazy(db_config));
                tracing::info!("Blog store: PostgreSQL (connects on first use)");

                return Self {
                    blogs: Arc::new(PostgresBlogRepository::new(connections.clone())),
                    settings: config.blog.clone(),
                    db: Some(connections),
                };
            }
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repository");

        Self::in_memory(config.blog.clone())
    }

    /// State backed by the in-memory store.
    pub fn in_memory(settings: BlogSettings) -> Self {
        Self {
            blogs: Arc::new(InMemoryBlogRepository::new()),
            settings,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Storage backend state for health reporting.
    pub fn database_status(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            return if db.is_connected() {
                "connected"
            } else {
                "idle"
            };
        }
        "in-memory"
    }
}
