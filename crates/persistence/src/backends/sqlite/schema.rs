//! SQLite schema definitions and migrations.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(internal_error(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| internal_error(format!("Failed to create schema_version table: {}", e)))?;

    // Only an empty table means "no schema yet"
    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| internal_error(format!("Failed to read schema_version: {}", e)))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| internal_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| internal_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    // ITEM_VALUE is NUMERIC so integer criteria compare numerically
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Lore (
            LORE_ID INTEGER PRIMARY KEY,
            OBJECT_NAME TEXT,
            ITEM_TYPE TEXT,
            ITEM_IS TEXT,
            SUBMITTER TEXT,
            AFFECTS TEXT,
            APPLY INTEGER,
            RESTRICTS TEXT,
            CREATE_DATE TEXT,
            CLASS TEXT,
            MAT_CLASS TEXT,
            MATERIAL TEXT,
            ITEM_VALUE NUMERIC,
            EXTRA TEXT,
            IMMUNE TEXT,
            EFFECTS TEXT,
            WEIGHT INTEGER,
            CAPACITY INTEGER,
            ITEM_LEVEL TEXT,
            CONTAINER_SIZE INTEGER,
            CHARGES INTEGER,
            SPEED INTEGER,
            ACCURACY INTEGER,
            POWER INTEGER,
            DAMAGE TEXT,
            CAN_USE TEXT
        )",
        [],
    )
    .map_err(|e| internal_error(format!("Failed to create Lore table: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Person (
            PERSON_ID INTEGER PRIMARY KEY,
            CHARNAME TEXT,
            LIGHT TEXT,
            RING1 TEXT,
            RING2 TEXT,
            NECK1 TEXT,
            NECK2 TEXT,
            BODY TEXT,
            HEAD TEXT,
            LEGS TEXT,
            FEET TEXT,
            ARMS TEXT,
            SLUNG TEXT,
            HANDS TEXT,
            SHIELD TEXT,
            ABOUT TEXT,
            WAIST TEXT,
            POUCH TEXT,
            RWRIST TEXT,
            LWRIST TEXT,
            PRIMARY_WEAP TEXT,
            SECONDARY_WEAP TEXT,
            HELD TEXT,
            BOTH_HANDS TEXT,
            SUBMITTER TEXT,
            CREATE_DATE TEXT,
            CLAN_ID INTEGER
        )",
        [],
    )
    .map_err(|e| internal_error(format!("Failed to create Person table: {}", e)))?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_lore_object_name ON Lore(OBJECT_NAME);
         CREATE INDEX IF NOT EXISTS idx_lore_create_date ON Lore(CREATE_DATE);
         CREATE INDEX IF NOT EXISTS idx_person_charname ON Person(CHARNAME);
         CREATE INDEX IF NOT EXISTS idx_person_clan ON Person(CLAN_ID);
         CREATE INDEX IF NOT EXISTS idx_person_create_date ON Person(CREATE_DATE);",
    )
    .map_err(|e| internal_error(format!("Failed to create indexes: {}", e)))?;

    Ok(())
}
