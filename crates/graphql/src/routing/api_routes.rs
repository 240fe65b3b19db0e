//! API route configuration.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// - `POST /graphql` - Execute a GraphQL request
/// - `GET /graphql` - GraphiQL explorer
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(
            handlers::GRAPHQL_PATH,
            get(handlers::graphiql_handler).post(handlers::graphql_handler),
        )
        .route("/health", get(handlers::health_handler))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler))
        .with_state(state)
}
