//! SQL functions registered on every SQLite connection.

use std::sync::Arc;

use regex::Regex;
use rusqlite::Connection;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registers the user functions the query compiler relies on.
///
/// SQLite parses `X REGEXP Y` but ships no implementation; it calls the
/// user function `regexp(Y, X)`.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        regexp,
    )
}

fn regexp(ctx: &Context<'_>) -> rusqlite::Result<bool> {
    // Compiled once per statement and cached as auxiliary data
    let pattern: Arc<Regex> = ctx.get_or_create_aux(0, |vr| -> Result<_, BoxError> {
        Ok(Regex::new(vr.as_str()?)?)
    })?;

    Ok(match ctx.get_raw(1) {
        ValueRef::Text(text) => std::str::from_utf8(text).is_ok_and(|s| pattern.is_match(s)),
        _ => false,
    })
}
