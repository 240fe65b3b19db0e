//! GraphQL API tests.
//!
//! Exercises every query field over HTTP against a seeded in-memory
//! database:
//! - Single record lookups and listings
//! - Flexible criteria search and cursor pagination
//! - Person connections and the recent feed
//! - Error reporting through `extensions.code`

mod common;

use serde_json::{Value, json};

use lorebot_graphql::ServerConfig;

use common::{
    create_test_server, create_test_server_with_config, graphql, graphql_data, node_ids,
};

const FLEX_QUERY: &str = r#"
    query Flex($first: Int, $after: String, $criteria: String!) {
        FlexQuery(first: $first, after: $after, requestor: "tester", flexCriteria: $criteria) {
            edges { cursor node { LORE_ID OBJECT_NAME WEIGHT ITEM_VALUE } }
            pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
            totalCount
        }
    }
"#;

// =============================================================================
// Lore
// =============================================================================

#[tokio::test]
async fn test_lore_by_id() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        "{ lore(LORE_ID: 2) { LORE_ID OBJECT_NAME ITEM_TYPE AFFECTS ITEM_VALUE } }",
        json!({}),
    )
    .await;

    assert_eq!(data["lore"]["OBJECT_NAME"], "a glowing sword");
    assert_eq!(data["lore"]["ITEM_TYPE"], "WEAPON");
    assert_eq!(data["lore"]["AFFECTS"], "HITROLL by 2,DAMROLL by +3");
    assert_eq!(data["lore"]["ITEM_VALUE"], "1500");
}

#[tokio::test]
async fn test_lore_missing_is_null() {
    let server = create_test_server();

    let data = graphql_data(&server, "{ lore(LORE_ID: 999) { LORE_ID } }", json!({})).await;

    assert_eq!(data["lore"], Value::Null);
}

#[tokio::test]
async fn test_all_lore_search_tokens() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"{ swords: allLore(searchToken: "SWORD") { LORE_ID }
             glowing: allLore(searchToken: "glowing.sword") { LORE_ID }
             everything: allLore { LORE_ID } }"#,
        json!({}),
    )
    .await;

    let ids = |v: &Value| -> Vec<i64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|l| l["LORE_ID"].as_i64().unwrap())
            .collect()
    };
    assert_eq!(ids(&data["swords"]), vec![2, 5]);
    assert_eq!(ids(&data["glowing"]), vec![2]);
    assert_eq!(ids(&data["everything"]), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_all_lore_paginated_by_submitter() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"{ allLorePaginated(submitter: "kaz") {
               edges { node { LORE_ID } }
               pageInfo { hasNextPage hasPreviousPage }
               totalCount } }"#,
        json!({}),
    )
    .await;

    let connection = &data["allLorePaginated"];
    assert_eq!(node_ids(connection, "LORE_ID"), vec![1, 3]);
    assert_eq!(connection["totalCount"], 2);
    assert_eq!(connection["pageInfo"]["hasNextPage"], false);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], false);
}

// =============================================================================
// FlexQuery
// =============================================================================

#[tokio::test]
async fn test_flex_query_walks_pages() {
    let server = create_test_server();
    let criteria = "weight>=10&item_type=weapon";

    let data = graphql_data(
        &server,
        FLEX_QUERY,
        json!({ "first": 2, "criteria": criteria }),
    )
    .await;
    let first_page = &data["FlexQuery"];

    assert_eq!(node_ids(first_page, "LORE_ID"), vec![2, 3]);
    assert_eq!(first_page["totalCount"], 3);
    assert_eq!(first_page["pageInfo"]["hasNextPage"], true);
    assert_eq!(first_page["pageInfo"]["hasPreviousPage"], false);
    assert_eq!(first_page["pageInfo"]["startCursor"], "Mg==");
    assert_eq!(first_page["pageInfo"]["endCursor"], "Mw==");
    assert_eq!(first_page["edges"][0]["cursor"], "Mg==");

    let after = first_page["pageInfo"]["endCursor"].clone();
    let data = graphql_data(
        &server,
        FLEX_QUERY,
        json!({ "first": 2, "after": after, "criteria": criteria }),
    )
    .await;
    let second_page = &data["FlexQuery"];

    assert_eq!(node_ids(second_page, "LORE_ID"), vec![5]);
    assert_eq!(second_page["totalCount"], 3);
    assert_eq!(second_page["pageInfo"]["hasNextPage"], false);
    assert_eq!(second_page["pageInfo"]["hasPreviousPage"], true);
}

#[tokio::test]
async fn test_flex_query_affects() {
    let server = create_test_server();

    let data = graphql_data(&server, FLEX_QUERY, json!({ "criteria": "affects=INT by 1" })).await;

    assert_eq!(node_ids(&data["FlexQuery"], "LORE_ID"), vec![1, 5]);
    assert_eq!(data["FlexQuery"]["totalCount"], 2);
}

#[tokio::test]
async fn test_flex_query_rejected_criteria_is_empty() {
    let server = create_test_server();

    for criteria in ["banana=5", "weight>=10&banana=5", "weight", "   "] {
        let data = graphql_data(&server, FLEX_QUERY, json!({ "criteria": criteria })).await;
        let connection = &data["FlexQuery"];

        assert_eq!(connection["edges"], json!([]), "criteria {:?}", criteria);
        assert_eq!(connection["totalCount"], 0);
        assert_eq!(connection["pageInfo"]["hasNextPage"], false);
        assert_eq!(connection["pageInfo"]["endCursor"], Value::Null);
    }
}

#[tokio::test]
async fn test_flex_query_first_is_clamped() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        FLEX_QUERY,
        json!({ "first": 500, "criteria": "weight>0" }),
    )
    .await;
    assert_eq!(node_ids(&data["FlexQuery"], "LORE_ID"), vec![1, 2, 3, 4, 5]);

    let data = graphql_data(
        &server,
        FLEX_QUERY,
        json!({ "first": -3, "criteria": "weight>0" }),
    )
    .await;
    let connection = &data["FlexQuery"];
    assert_eq!(connection["edges"], json!([]));
    assert_eq!(connection["totalCount"], 5);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
}

#[tokio::test]
async fn test_omitted_first_uses_configured_page_size() {
    let server = create_test_server_with_config(ServerConfig {
        default_page_size: 2,
        ..ServerConfig::for_testing()
    });

    let data = graphql_data(&server, FLEX_QUERY, json!({ "criteria": "weight>0" })).await;
    assert_eq!(node_ids(&data["FlexQuery"], "LORE_ID"), vec![1, 2]);
    assert_eq!(data["FlexQuery"]["pageInfo"]["hasNextPage"], true);

    let data = graphql_data(
        &server,
        r#"{ __type(name: "Query") { fields { name args { name defaultValue } } } }"#,
        json!({}),
    )
    .await;
    let fields = data["__type"]["fields"].as_array().unwrap();
    for name in ["FlexQuery", "allLorePaginated", "allPersonsConnection"] {
        let field = fields.iter().find(|f| f["name"] == name).unwrap();
        let first = field["args"]
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["name"] == "first")
            .unwrap();
        assert_eq!(first["defaultValue"], Value::Null, "{name} first");
    }
}

#[tokio::test]
async fn test_flex_query_invalid_cursor() {
    let server = create_test_server();

    let response = graphql(
        &server,
        FLEX_QUERY,
        json!({ "after": "%%not-a-cursor%%", "criteria": "weight>0" }),
    )
    .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");
    assert_eq!(body["errors"][0]["path"], json!(["FlexQuery"]));
}

#[tokio::test]
async fn test_flex_query_requires_requestor() {
    let server = create_test_server();

    let response = graphql(
        &server,
        r#"{ FlexQuery(flexCriteria: "weight>0") { totalCount } }"#,
        json!({}),
    )
    .await;

    let body: Value = response.json();
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_is_valid_criteria() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"{ good: isValidCriteria(flexCriteria: "weight>=10&item_type=weapon")
             bad: isValidCriteria(flexCriteria: "banana=5")
             empty: isValidCriteria(flexCriteria: "") }"#,
        json!({}),
    )
    .await;

    assert_eq!(data["good"], true);
    assert_eq!(data["bad"], false);
    assert_eq!(data["empty"], false);
}

// =============================================================================
// Persons
// =============================================================================

#[tokio::test]
async fn test_person_by_id() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        "{ person(PERSON_ID: 3) { PERSON_ID CHARNAME PRIMARY_WEAP CLAN_ID } }",
        json!({}),
    )
    .await;

    assert_eq!(data["person"]["CHARNAME"], "Vexilla");
    assert_eq!(data["person"]["PRIMARY_WEAP"], "a cursed dagger");
    assert_eq!(data["person"]["CLAN_ID"], 7);
}

#[tokio::test]
async fn test_all_persons() {
    let server = create_test_server();

    let data = graphql_data(&server, "{ allPersons { CHARNAME } }", json!({})).await;

    assert_eq!(
        data["allPersons"],
        json!([
            { "CHARNAME": "Grimwald" },
            { "CHARNAME": "Kazrak" },
            { "CHARNAME": "Vexilla" }
        ])
    );
}

#[tokio::test]
async fn test_all_persons_connection_filter() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"query People($filter: PersonFilterInput) {
               allPersonsConnection(first: 1, filter: $filter) {
                   edges { node { PERSON_ID } }
                   pageInfo { hasNextPage }
                   totalCount } }"#,
        json!({ "filter": { "CLAN_ID": 4 } }),
    )
    .await;

    let connection = &data["allPersonsConnection"];
    assert_eq!(node_ids(connection, "PERSON_ID"), vec![1]);
    assert_eq!(connection["totalCount"], 2);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
}

// =============================================================================
// Recent feed
// =============================================================================

#[tokio::test]
async fn test_recent_feed() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"{ recent(DISCORD_USER: "someone#1234") { TBL_SRC DESCRIPTION submitter } }"#,
        json!({}),
    )
    .await;

    let descriptions: Vec<&str> = data["recent"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["DESCRIPTION"].as_str().unwrap())
        .collect();

    // Limited to the testing configuration's five entries, newest first
    assert_eq!(
        descriptions,
        vec![
            "Kazrak",
            "a silver sword",
            "a cursed dagger",
            "Grimwald",
            "a heavy war hammer"
        ]
    );
    assert_eq!(data["recent"][0]["TBL_SRC"], "Person");
    assert_eq!(data["recent"][0]["submitter"], "kaz");
}

// =============================================================================
// Schema
// =============================================================================

#[tokio::test]
async fn test_schema_type_names() {
    let server = create_test_server();

    let data = graphql_data(
        &server,
        r#"{ lore: __type(name: "LoreConnection") { name }
             person: __type(name: "PersonEdge") { name }
             info: __type(name: "PageInfo") { fields { name } } }"#,
        json!({}),
    )
    .await;

    assert_eq!(data["lore"]["name"], "LoreConnection");
    assert_eq!(data["person"]["name"], "PersonEdge");
    let fields: Vec<&str> = data["info"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["hasNextPage", "hasPreviousPage", "startCursor", "endCursor"]
    );
}
