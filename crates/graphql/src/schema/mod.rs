//! The GraphQL schema.
//!
//! The API is read-only: a [`QueryRoot`] with no mutations or subscriptions.
//! Resolvers reach the store through the [`Catalog`] and the page limits
//! stored as schema data.

mod connection;
mod pagination;
mod query;

pub use connection::{LoreConnection, LoreEdge, PageInfoObject, PersonConnection, PersonEdge};
pub use pagination::PageLimits;
pub use query::QueryRoot;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use lorebot_persistence::Catalog;

/// The executable Lorebot schema.
pub type LoreSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema with the catalog and page limits attached as data.
pub fn build_schema(catalog: Catalog, limits: PageLimits) -> LoreSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(catalog)
        .data(limits)
        .finish()
}
