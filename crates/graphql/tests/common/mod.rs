//! Shared test harness for the GraphQL API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use lorebot_graphql::{ServerConfig, create_app_with_config};
use lorebot_persistence::Catalog;
use lorebot_persistence::backends::sqlite::SqliteBackend;
use serde_json::{Value, json};

/// Five items, ids 1 through 5.
///
/// | id | object name        | type   | weight | affects                    |
/// |----|--------------------|--------|--------|----------------------------|
/// | 1  | a bone ring        | ARMOR  | 1      | INT by 1,WIS by 1          |
/// | 2  | a glowing sword    | WEAPON | 12     | HITROLL by 2,DAMROLL by +3 |
/// | 3  | a heavy war hammer | WEAPON | 25     | STR by 2                   |
/// | 4  | a cursed dagger    | WEAPON | 4      | DEX by -2                  |
/// | 5  | a silver sword     | WEAPON | 10     | INT by +1                  |
pub const SEED_SQL: &str = "
INSERT INTO Lore (LORE_ID, OBJECT_NAME, ITEM_TYPE, WEIGHT, AFFECTS, SUBMITTER, ITEM_VALUE, CREATE_DATE)
VALUES
    (1, 'a bone ring', 'ARMOR', 1, 'INT by 1,WIS by 1', 'kaz', '900', '2024-01-01 10:00:00'),
    (2, 'a glowing sword', 'WEAPON', 12, 'HITROLL by 2,DAMROLL by +3', 'grim', '1500', '2024-01-02 10:00:00'),
    (3, 'a heavy war hammer', 'WEAPON', 25, 'STR by 2', 'kaz', '2500', '2024-01-03 10:00:00'),
    (4, 'a cursed dagger', 'WEAPON', 4, 'DEX by -2', 'vex', '300', '2024-01-04 10:00:00'),
    (5, 'a silver sword', 'WEAPON', 10, 'INT by +1', 'grim', '1200', '2024-01-05 10:00:00');

INSERT INTO Person (PERSON_ID, CHARNAME, PRIMARY_WEAP, SUBMITTER, CLAN_ID, CREATE_DATE)
VALUES
    (1, 'Grimwald', 'a glowing sword', 'grim', 4, '2024-01-03 12:00:00'),
    (2, 'Kazrak', 'a heavy war hammer', 'kaz', 4, '2024-01-09 10:00:00'),
    (3, 'Vexilla', 'a cursed dagger', 'vex', 7, '2024-01-02 12:00:00');
";

/// Creates a test server over a seeded in-memory database.
pub fn create_test_server() -> TestServer {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with a custom configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> TestServer {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    backend
        .load_fixture_sql(SEED_SQL)
        .expect("Failed to load seed data");

    let app = create_app_with_config(Catalog::new(Arc::new(backend)), config);
    TestServer::new(app).expect("Failed to create test server")
}

/// Posts a GraphQL query with variables.
pub async fn graphql(server: &TestServer, query: &str, variables: Value) -> TestResponse {
    server
        .post("/graphql")
        .json(&json!({ "query": query, "variables": variables }))
        .await
}

/// Posts a GraphQL query and returns its `data`, failing on any error.
pub async fn graphql_data(server: &TestServer, query: &str, variables: Value) -> Value {
    let response = graphql(server, query, variables).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(
        body.get("errors").is_none(),
        "unexpected GraphQL errors: {}",
        body["errors"]
    );
    body["data"].clone()
}

/// Extracts the ids of a connection's nodes.
pub fn node_ids(connection: &Value, id_field: &str) -> Vec<i64> {
    connection["edges"]
        .as_array()
        .expect("edges should be an array")
        .iter()
        .map(|edge| edge["node"][id_field].as_i64().expect("id should be an integer"))
        .collect()
}
