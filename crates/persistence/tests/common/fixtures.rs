//! Seed data and backend builders for persistence tests.

use std::sync::Arc;

use lorebot_persistence::Catalog;
use lorebot_persistence::backends::sqlite::SqliteBackend;
use lorebot_persistence::types::{Connection, Record};

/// Eight items with a mix of types, weights and affects.
///
/// | id | object name          | type      | weight | affects                    |
/// |----|----------------------|-----------|--------|----------------------------|
/// | 1  | a bone ring          | ARMOR     | 1      | INT by 1,WIS by 1          |
/// | 2  | a glowing sword      | WEAPON    | 12     | HITROLL by 2,DAMROLL by +3 |
/// | 3  | a heavy war hammer   | WEAPON    | 25     | STR by 2                   |
/// | 4  | a cursed dagger      | WEAPON    | 4      | DEX by -2                  |
/// | 5  | a silver sword       | WEAPON    | 10     | INT by +1                  |
/// | 6  | a wooden shield      | ARMOR     | 15     | ARMOR by 3                 |
/// | 7  | a longsword of flame | WEAPON    | 14     | HITROLL by 1               |
/// | 8  | a bag of holding     | CONTAINER | 2      |                            |
pub const LORE_FIXTURE: &str = "
INSERT INTO Lore (LORE_ID, OBJECT_NAME, ITEM_TYPE, WEIGHT, AFFECTS, SUBMITTER, CLASS, ITEM_VALUE, CREATE_DATE)
VALUES
    (1, 'a bone ring', 'ARMOR', 1, 'INT by 1,WIS by 1', 'kaz', 'mage', '900', '2024-01-01 10:00:00'),
    (2, 'a glowing sword', 'WEAPON', 12, 'HITROLL by 2,DAMROLL by +3', 'grim', 'warrior', '1500', '2024-01-02 10:00:00'),
    (3, 'a heavy war hammer', 'WEAPON', 25, 'STR by 2', 'kaz', 'warrior', '2500', '2024-01-03 10:00:00'),
    (4, 'a cursed dagger', 'WEAPON', 4, 'DEX by -2', 'vex', 'thief', '300', '2024-01-04 10:00:00'),
    (5, 'a silver sword', 'WEAPON', 10, 'INT by +1', 'grim', 'warrior', '1200', '2024-01-05 10:00:00'),
    (6, 'a wooden shield', 'ARMOR', 15, 'ARMOR by 3', 'vex', NULL, '100', '2024-01-06 10:00:00'),
    (7, 'a longsword of flame', 'WEAPON', 14, 'HITROLL by 1', 'kaz', 'warrior', '3000', '2024-01-07 10:00:00'),
    (8, 'a bag of holding', 'CONTAINER', 2, NULL, 'kaz', NULL, '5000', '2024-01-08 10:00:00');
";

/// Four characters across two clans.
pub const PERSON_FIXTURE: &str = "
INSERT INTO Person (PERSON_ID, CHARNAME, RING1, PRIMARY_WEAP, SUBMITTER, CLAN_ID, CREATE_DATE)
VALUES
    (1, 'Grimwald', 'a bone ring', 'a glowing sword', 'grim', 4, '2024-01-03 12:00:00'),
    (2, 'Kazrak', NULL, 'a heavy war hammer', 'kaz', 4, '2024-01-09 10:00:00'),
    (3, 'Vexilla', NULL, 'a cursed dagger', 'vex', 7, '2024-01-02 12:00:00'),
    (4, 'Grimmy', NULL, NULL, 'kaz', NULL, '2024-01-10 10:00:00');
";

/// Creates an in-memory backend with the schema and both fixtures loaded.
pub fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
        .load_fixture_sql(LORE_FIXTURE)
        .expect("Failed to load lore fixture");
    backend
        .load_fixture_sql(PERSON_FIXTURE)
        .expect("Failed to load person fixture");
    backend
}

/// Creates a catalog over a seeded in-memory backend.
pub fn create_catalog() -> Catalog {
    Catalog::new(Arc::new(create_backend()))
}

/// Ids of the nodes in a connection, in page order.
pub fn ids<R: Record>(conn: &Connection<R>) -> Vec<i64> {
    conn.nodes().map(Record::id).collect()
}
