//! SQLite backend implementation.
//!
//! Supports in-memory databases (tests, demos) and file-based databases. Every
//! pooled connection gets a busy timeout and the `REGEXP` function the
//! `affects` predicates rely on.
//!
//! # Example
//!
//! ```no_run
//! use lorebot_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! backend.load_fixture_sql(
//!     "INSERT INTO Lore (LORE_ID, OBJECT_NAME, WEIGHT) VALUES (1, 'a bone ring', 1);",
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE Lore (
//!     LORE_ID INTEGER PRIMARY KEY,
//!     OBJECT_NAME TEXT,
//!     ITEM_TYPE TEXT,
//!     AFFECTS TEXT,
//!     WEIGHT INTEGER,
//!     ITEM_VALUE NUMERIC,
//!     -- ...one column per Lore field
//! );
//!
//! CREATE TABLE Person (
//!     PERSON_ID INTEGER PRIMARY KEY,
//!     CHARNAME TEXT,
//!     -- ...equipment slots
//!     SUBMITTER TEXT,
//!     CREATE_DATE TEXT,
//!     CLAN_ID INTEGER
//! );
//! ```

mod backend;
mod functions;
pub(crate) mod schema;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use functions::register_functions;
