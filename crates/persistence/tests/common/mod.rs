//! Test infrastructure for the persistence layer.
//!
//! Integration tests run against an in-memory SQLite backend seeded with a
//! small, fixed catalog so expected ids can be written down by hand.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
