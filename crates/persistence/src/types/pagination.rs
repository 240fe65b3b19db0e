//! Pagination types for search results.
//!
//! Connections follow the Relay shape the GraphQL layer exposes: a list of
//! edges (node + opaque cursor), page info, and a total count that only
//! reflects the filter predicates.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Standard alphabet, padded on encode, padding optional on decode.
const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An opaque cursor for keyset pagination over an integer id column.
///
/// The encoded form is the base64 of the id's decimal text. It exists for
/// opacity only; there is no signing or compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    id: i64,
}

impl PageCursor {
    /// Creates a cursor positioned at the given record id.
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    /// Returns the record id at the cursor position.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Encodes the cursor to an opaque string.
    pub fn encode(&self) -> String {
        CURSOR_ENGINE.encode(self.id.to_string())
    }

    /// Decodes a cursor from an opaque string.
    ///
    /// Anything that is not base64 of a decimal integer is rejected, so callers
    /// can tell "no cursor" apart from "bad cursor".
    pub fn decode(s: &str) -> SearchResult<Self> {
        let invalid = || SearchError::InvalidCursor {
            cursor: s.to_string(),
        };

        let bytes = CURSOR_ENGINE.decode(s.trim()).map_err(|_| invalid())?;
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        let id = text.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self { id })
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more results after this page.
    pub has_next_page: bool,

    /// Whether the request started from a cursor.
    pub has_previous_page: bool,

    /// Cursor of the first edge, if any.
    pub start_cursor: Option<String>,

    /// Cursor of the last edge, if any.
    pub end_cursor: Option<String>,
}

/// A node together with the cursor pointing at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The record.
    pub node: T,

    /// Encoded cursor of the record's id.
    pub cursor: String,
}

/// A page of search results with its pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The edges in this page, in ascending id order.
    pub edges: Vec<Edge<T>>,

    /// Pagination information.
    pub page_info: PageInfo,

    /// Number of records matching the filter, independent of the window.
    pub total_count: i64,
}

impl<T> Connection<T> {
    /// Creates the connection returned when nothing can match.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }

    /// Builds a connection from the rows of an overfetched page query.
    ///
    /// `rows` may hold one record more than `page_size`; that extra record
    /// only signals that a next page exists and is dropped.
    pub fn from_overfetch<F>(
        mut rows: Vec<T>,
        page_size: usize,
        had_cursor: bool,
        total_count: i64,
        id_of: F,
    ) -> Self
    where
        F: Fn(&T) -> i64,
    {
        let has_next_page = rows.len() > page_size;
        rows.truncate(page_size);

        let edges: Vec<Edge<T>> = rows
            .into_iter()
            .map(|node| {
                let cursor = PageCursor::new(id_of(&node)).encode();
                Edge { node, cursor }
            })
            .collect();

        let page_info = PageInfo {
            has_next_page,
            has_previous_page: had_cursor,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Self {
            edges,
            page_info,
            total_count,
        }
    }

    /// Returns true if this page has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the number of edges in this page.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the nodes of this page.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self::empty()
    }
}
