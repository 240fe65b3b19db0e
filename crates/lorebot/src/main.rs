//! Lorebot server
//!
//! Serves the lore and character catalog of the Lorebot chat-bot over GraphQL.

use std::sync::Arc;

use clap::Parser;
use lorebot_graphql::{ServerConfig, create_app_with_config, init_logging};
use lorebot_persistence::Catalog;
use tracing::{info, warn};

#[cfg(feature = "sqlite")]
use lorebot_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Opens the SQLite database, creates the schema and runs the seed file.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    info!(database = %config.database_url, "Initializing SQLite backend");
    if config.is_memory_database() {
        warn!("Using an in-memory database; data is lost on shutdown");
    }

    let backend_config = SqliteBackendConfig {
        max_connections: config.max_connections,
        min_connections: config.max_connections.min(1),
        ..Default::default()
    };

    let backend = SqliteBackend::with_config(&config.database_url, backend_config)?;
    backend.init_schema()?;

    if let Some(seed_file) = &config.seed_file {
        backend.load_fixture_file(seed_file)?;
    }

    Ok(backend)
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Starts the Axum HTTP server and waits for a shutdown signal.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level, config.log_format);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        database = %config.database_url,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Lorebot server"
    );

    start_sqlite(config).await
}

/// Serves from SQLite and closes the pool once the server has stopped.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = Arc::new(create_sqlite_backend(&config)?);
    let app = create_app_with_config(Catalog::new(backend.clone()), config.clone());

    serve(app, &config).await?;

    match Arc::try_unwrap(backend) {
        Ok(backend) => backend.close(),
        Err(_) => warn!("Database still in use at shutdown; pool dropped with last reference"),
    }
    info!("Server stopped");
    Ok(())
}

/// Fallback when the sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p lorebot --features sqlite"
    )
}
