//! Lorebot Persistence Layer
//!
//! This crate holds everything between the GraphQL API and the database: the
//! flexible-search criteria compiler, cursor pagination, the record types of
//! the `Lore` and `Person` tables and the SQLite backend.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite backend with in-memory and file modes
//! - `graphql` - Derives GraphQL object types for the records
//!
//! # Architecture
//!
//! - [`search`] - Criteria parser, predicate compiler and search orchestrator
//! - [`types`] - Records, cursors and connections
//! - [`error`] - Error types for all operations
//! - [`core`] - The query executor abstraction and the catalog of reads
//! - [`backends`] - Backend implementations
//!
//! # Flexible Search
//!
//! Criteria strings are validated as a whole, compiled into bound predicates
//! and run as a count query plus an overfetched page query:
//!
//! ```no_run
//! use std::sync::Arc;
//! use lorebot_persistence::Catalog;
//! use lorebot_persistence::backends::sqlite::SqliteBackend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let catalog = Catalog::new(Arc::new(backend));
//! let page = catalog.flex_query("weight>=10&item_type=weapon", None, 10).await?;
//!
//! for edge in &page.edges {
//!     println!("{} {:?}", edge.cursor, edge.node.object_name);
//! }
//! if page.page_info.has_next_page {
//!     let after = page.page_info.end_cursor.as_deref();
//!     let next = catalog.flex_query("weight>=10&item_type=weapon", after, 10).await?;
//!     println!("{} more", next.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Connection, Lore, PageCursor, PageInfo, Person, PersonFilter, Recent};

// Re-export core traits
pub use core::{Catalog, QueryExecutor};
pub use search::{SearchOrchestrator, is_valid_criteria};
