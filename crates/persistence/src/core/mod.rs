//! Core storage abstractions.
//!
//! - [`QueryExecutor`] - Runs parametrized SQL against a data store
//! - [`Catalog`] - The read operations the API exposes, built on an executor
//!
//! Backends implement [`QueryExecutor`]; everything above it (criteria
//! compilation, pagination, record mapping) is backend-independent.

mod catalog;
mod executor;

pub use catalog::Catalog;
pub use executor::{QueryExecutor, Row, fetch_count, fetch_records};
