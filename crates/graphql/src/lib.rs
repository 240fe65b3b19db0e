//! # lorebot-graphql - GraphQL API for the Lorebot catalog
//!
//! This crate exposes the lore and person tables of the Lorebot chat-bot as a
//! read-only GraphQL API served by Axum. The heavy lifting (criteria
//! compilation, cursor pagination, storage) lives in `lorebot-persistence`;
//! this crate maps it onto a schema, HTTP routes and configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lorebot_graphql::{ServerConfig, create_app_with_config};
//! use lorebot_persistence::Catalog;
//! use lorebot_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("lorebot.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(Catalog::new(Arc::new(backend)), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/graphql` | Execute a GraphQL request |
//! | GET | `/graphql` | GraphiQL explorer |
//! | GET | `/health` | Health check |
//! | GET | `/_liveness` | Liveness probe |
//! | GET | `/_readiness` | Readiness probe (runs a query) |
//!
//! ## Queries
//!
//! | Field | Returns |
//! |-------|---------|
//! | `lore(LORE_ID)` | One lore entry |
//! | `allLore(searchToken)` | Lore entries matching name tokens |
//! | `allLorePaginated(first, after, searchToken, submitter)` | `LoreConnection` |
//! | `FlexQuery(first, after, requestor, flexCriteria)` | `LoreConnection` |
//! | `isValidCriteria(flexCriteria)` | Whether the criteria would be accepted |
//! | `person(PERSON_ID)` | One person |
//! | `allPersons` | Every person |
//! | `allPersonsConnection(first, after, filter)` | `PersonConnection` |
//! | `recent(DISCORD_USER)` | Latest submissions |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their GraphQL / HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (catalog, schema, configuration)
//! - [`schema`] - GraphQL types and resolvers
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod schema;
pub mod state;

// Re-export commonly used types
pub use config::{LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use schema::{LoreSchema, build_schema};
pub use state::AppState;

use axum::Router;
use lorebot_persistence::Catalog;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with custom configuration.
///
/// Sets up the GraphQL and probe routes with tracing, request timeouts and,
/// when enabled, CORS.
pub fn create_app_with_config(catalog: Catalog, config: ServerConfig) -> Router {
    info!(
        backend = catalog.backend_name(),
        "Creating GraphQL API server"
    );

    let state = AppState::new(catalog, config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// Call once at startup. `RUST_LOG`, when set, overrides `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
/// * `format` - How events are rendered
pub fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lorebot={level},lorebot_graphql={level},lorebot_persistence={level},tower_http=debug"
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Full => registry.with(fmt::layer()).init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_from_lists() {
        let config = ServerConfig {
            cors_origins: "http://localhost:3000, http://example.com".to_string(),
            cors_methods: "GET,POST".to_string(),
            cors_headers: "Content-Type".to_string(),
            ..Default::default()
        };
        // Building must not panic on explicit lists
        let _ = build_cors_layer(&config);
    }

    #[test]
    fn test_cors_layer_wildcards() {
        let config = ServerConfig {
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            ..Default::default()
        };
        let _ = build_cors_layer(&config);
    }
}
