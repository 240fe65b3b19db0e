//! Route configuration for the GraphQL API.

pub mod api_routes;

pub use api_routes::create_routes;
