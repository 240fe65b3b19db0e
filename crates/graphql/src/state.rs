//! Application state for the GraphQL API.
//!
//! Shared by every request handler: the catalog, the executable schema and
//! the server configuration.

use std::sync::Arc;

use lorebot_persistence::Catalog;

use crate::config::ServerConfig;
use crate::schema::{LoreSchema, PageLimits, build_schema};

/// Shared application state.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use lorebot_graphql::{AppState, ServerConfig};
/// use lorebot_persistence::Catalog;
/// use lorebot_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Catalog::new(Arc::new(backend)), ServerConfig::default());
/// ```
#[derive(Clone)]
pub struct AppState {
    catalog: Catalog,
    schema: LoreSchema,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates the state and builds the schema over the given catalog.
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        let schema = build_schema(catalog.clone(), PageLimits::from_config(&config));
        Self {
            catalog,
            schema,
            config: Arc::new(config),
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the executable schema.
    pub fn schema(&self) -> &LoreSchema {
        &self.schema
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
