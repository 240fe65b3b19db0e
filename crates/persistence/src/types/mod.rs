//! Core types for the persistence layer.
//!
//! - [`Lore`], [`Person`], [`Recent`] - Records read from the store
//! - [`PersonFilter`] - Structured filter for person listings
//! - [`PageCursor`], [`Connection`], [`PageInfo`] - Cursor pagination
//!
//! # Examples
//!
//! ```
//! use lorebot_persistence::types::PageCursor;
//!
//! let cursor = PageCursor::new(42).encode();
//! assert_eq!(PageCursor::decode(&cursor).unwrap().id(), 42);
//! ```

mod pagination;
mod records;

pub use pagination::{Connection, Edge, PageCursor, PageInfo};
pub use records::{Lore, Person, PersonFilter, Recent, Record};
