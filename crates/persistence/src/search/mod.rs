//! The flexible-search query compiler.
//!
//! - [`criteria`] - Parses `field<op>value&...` strings into clauses
//! - [`fields`] - The accepted field table shared by parser and compiler
//! - [`compiler`] - Turns clauses into parametrized predicates
//! - [`affects`] - The `<label> by <magnitude>` sub-grammar
//! - [`filters`] - Filters for listings outside the criteria language
//! - [`query`] - Count, page and list query rendering
//! - [`orchestrator`] - Runs count and page queries and builds connections
//!
//! # Examples
//!
//! ```
//! use lorebot_persistence::search::{compile_criteria, is_valid_criteria};
//!
//! assert!(is_valid_criteria("weight>=10&item_type=weapon"));
//!
//! let filter = compile_criteria("weight>=10&item_type=weapon").unwrap();
//! assert_eq!(filter.conditions(), vec!["WEIGHT >= ?", "ITEM_TYPE LIKE ?"]);
//! ```

pub mod affects;
pub mod compiler;
pub mod criteria;
pub mod fields;
pub mod filters;
pub mod orchestrator;
pub mod query;
pub mod sql;

pub use compiler::{compile, compile_criteria};
pub use criteria::{Clause, is_valid_criteria, parse_criteria};
pub use fields::{FieldKind, FieldSpec};
pub use orchestrator::SearchOrchestrator;
pub use query::{CompiledQuery, Projection};
pub use sql::{CompiledFilter, Comparison, Operator, Predicate, SqlParam};
