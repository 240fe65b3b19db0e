//! Record types stored in the `Lore` and `Person` tables.
//!
//! Field names follow the column names of the tables (upper snake case), which
//! is also how the GraphQL API exposes them.

// Column fields are documented by their names
#![allow(missing_docs)]

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A table whose rows can be paginated by an integer id column.
pub trait Record: DeserializeOwned + Send + 'static {
    /// The table the records live in.
    const TABLE: &'static str;

    /// The integer primary key used for ordering and cursors.
    const ID_COLUMN: &'static str;

    /// Returns the value of the id column.
    fn id(&self) -> i64;
}

/// A game item as recorded by the chat-bot's users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::SimpleObject),
    graphql(name = "Lore", rename_fields = "SCREAMING_SNAKE_CASE")
)]
pub struct Lore {
    pub lore_id: i64,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub item_is: Option<String>,
    #[serde(default)]
    pub submitter: Option<String>,
    #[serde(default)]
    pub affects: Option<String>,
    #[serde(default)]
    pub apply: Option<i64>,
    #[serde(default)]
    pub restricts: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub mat_class: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// Stored with numeric affinity so criteria can compare it as an integer.
    #[serde(default, deserialize_with = "text_or_number")]
    pub item_value: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub immune: Option<String>,
    #[serde(default)]
    pub effects: Option<String>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub item_level: Option<String>,
    #[serde(default)]
    pub container_size: Option<i64>,
    #[serde(default)]
    pub charges: Option<i64>,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub power: Option<i64>,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub can_use: Option<String>,
}

impl Record for Lore {
    const TABLE: &'static str = "Lore";
    const ID_COLUMN: &'static str = "LORE_ID";

    fn id(&self) -> i64 {
        self.lore_id
    }
}

/// A player character and the equipment it was seen wearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::SimpleObject),
    graphql(name = "Person", rename_fields = "SCREAMING_SNAKE_CASE")
)]
pub struct Person {
    pub person_id: i64,
    #[serde(default)]
    pub charname: Option<String>,
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub ring1: Option<String>,
    #[serde(default)]
    pub ring2: Option<String>,
    #[serde(default)]
    pub neck1: Option<String>,
    #[serde(default)]
    pub neck2: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub legs: Option<String>,
    #[serde(default)]
    pub feet: Option<String>,
    #[serde(default)]
    pub arms: Option<String>,
    #[serde(default)]
    pub slung: Option<String>,
    #[serde(default)]
    pub hands: Option<String>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub waist: Option<String>,
    #[serde(default)]
    pub pouch: Option<String>,
    #[serde(default)]
    pub rwrist: Option<String>,
    #[serde(default)]
    pub lwrist: Option<String>,
    #[serde(default)]
    pub primary_weap: Option<String>,
    #[serde(default)]
    pub secondary_weap: Option<String>,
    #[serde(default)]
    pub held: Option<String>,
    #[serde(default)]
    pub both_hands: Option<String>,
    #[serde(default)]
    pub submitter: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub clan_id: Option<i64>,
}

impl Record for Person {
    const TABLE: &'static str = "Person";
    const ID_COLUMN: &'static str = "PERSON_ID";

    fn id(&self) -> i64 {
        self.person_id
    }
}

/// One entry of the recent-activity feed across both tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::SimpleObject),
    graphql(name = "Recent", rename_fields = "SCREAMING_SNAKE_CASE")
)]
pub struct Recent {
    /// Source table, `Lore` or `Person`.
    #[serde(default)]
    pub tbl_src: Option<String>,
    /// Object name or character name.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default, rename = "submitter")]
    #[cfg_attr(feature = "graphql", graphql(name = "submitter"))]
    pub submitter: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Optional filters for listing persons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::InputObject),
    graphql(name = "PersonFilterInput", rename_fields = "SCREAMING_SNAKE_CASE")
)]
pub struct PersonFilter {
    /// Substring of the character name.
    #[serde(default)]
    pub charname: Option<String>,
    /// Substring of the submitter.
    #[serde(default)]
    pub submitter: Option<String>,
    /// Exact clan id.
    #[serde(default)]
    pub clan_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lore_from_row() {
        let lore: Lore = serde_json::from_value(json!({
            "LORE_ID": 7,
            "OBJECT_NAME": "a glowing sword",
            "AFFECTS": "HITROLL by 2,DAMROLL by 3",
            "WEIGHT": 12,
            "CAN_USE": null
        }))
        .unwrap();

        assert_eq!(lore.id(), 7);
        assert_eq!(lore.object_name.as_deref(), Some("a glowing sword"));
        assert_eq!(lore.weight, Some(12));
        assert_eq!(lore.can_use, None);
        assert_eq!(lore.item_type, None);
    }

    #[test]
    fn test_item_value_accepts_numbers() {
        let lore: Lore =
            serde_json::from_value(json!({ "LORE_ID": 1, "ITEM_VALUE": 1500 })).unwrap();
        assert_eq!(lore.item_value.as_deref(), Some("1500"));

        let lore: Lore =
            serde_json::from_value(json!({ "LORE_ID": 1, "ITEM_VALUE": "priceless" })).unwrap();
        assert_eq!(lore.item_value.as_deref(), Some("priceless"));

        let lore: Lore = serde_json::from_value(json!({ "LORE_ID": 1 })).unwrap();
        assert_eq!(lore.item_value, None);
    }

    #[test]
    fn test_person_columns() {
        let person: Person = serde_json::from_value(json!({
            "PERSON_ID": 3,
            "CHARNAME": "Grimwald",
            "RING1": "a bone ring",
            "PRIMARY_WEAP": "a glowing sword",
            "CLAN_ID": 4
        }))
        .unwrap();

        assert_eq!(person.id(), 3);
        assert_eq!(person.ring1.as_deref(), Some("a bone ring"));
        assert_eq!(person.primary_weap.as_deref(), Some("a glowing sword"));
        assert_eq!(Person::ID_COLUMN, "PERSON_ID");
    }

    #[test]
    fn test_recent_submitter_is_lowercase() {
        let recent: Recent = serde_json::from_value(json!({
            "TBL_SRC": "Lore",
            "DESCRIPTION": "a glowing sword",
            "CREATE_DATE": "2024-01-01 10:00:00",
            "submitter": "kaz"
        }))
        .unwrap();

        assert_eq!(recent.submitter.as_deref(), Some("kaz"));
        assert_eq!(recent.tbl_src.as_deref(), Some("Lore"));
    }
}
