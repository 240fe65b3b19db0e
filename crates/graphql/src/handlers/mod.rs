//! HTTP request handlers.
//!
//! - [`graphql`] - GraphQL execution and the GraphiQL explorer
//! - [`health`] - Health, liveness and readiness probes

pub mod graphql;
pub mod health;

pub use graphql::{GRAPHQL_PATH, graphiql_handler, graphql_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
