//! Relay-style connection objects.

// Field names mirror the GraphQL schema
#![allow(missing_docs)]

use async_graphql::SimpleObject;
use lorebot_persistence::types::{Connection, Edge, Lore, PageInfo, Person};

/// Pagination envelope of a connection.
#[derive(Debug, Clone, Default, SimpleObject)]
#[graphql(name = "PageInfo")]
pub struct PageInfoObject {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<PageInfo> for PageInfoObject {
    fn from(info: PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
        }
    }
}

macro_rules! connection_object {
    ($connection:ident, $edge:ident, $node:ty) => {
        /// A record and its cursor.
        #[derive(Debug, Clone, SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        /// One page of records.
        #[derive(Debug, Clone, SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub page_info: PageInfoObject,
            pub total_count: i64,
        }

        impl From<Connection<$node>> for $connection {
            fn from(connection: Connection<$node>) -> Self {
                Self {
                    edges: connection
                        .edges
                        .into_iter()
                        .map(|Edge { node, cursor }| $edge { node, cursor })
                        .collect(),
                    page_info: connection.page_info.into(),
                    total_count: connection.total_count,
                }
            }
        }
    };
}

connection_object!(LoreConnection, LoreEdge, Lore);
connection_object!(PersonConnection, PersonEdge, Person);
