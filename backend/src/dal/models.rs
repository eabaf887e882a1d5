//! Todo list data models
//!
//! Defines the typed entities the data-access layer hands back to callers.
//! Store documents are converted into these before leaving the layer.

use crate::error::AppError;
use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned identifier of a todo list
///
/// Rendered as the 24-character hex form of a MongoDB ObjectId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(ObjectId);

impl ListId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// The underlying ObjectId, for building store filters
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ListId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for ListId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for ListId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ListId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Identifier of an item, unique within its list
pub type ItemId = String;

/// A single entry of a todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoListItem {
    /// Identifier, unique within the owning list
    pub id: ItemId,
    /// Text of the item
    pub label: String,
    /// Completion flag
    #[serde(default)]
    pub checked: bool,
}

impl ToDoListItem {
    /// Create an unchecked item with a freshly generated identifier
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            label: label.into(),
            checked: false,
        }
    }
}

/// A todo list with all of its items, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoList {
    /// Unique identifier
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Items, oldest first
    #[serde(default)]
    pub items: Vec<ToDoListItem>,
}

impl ToDoList {
    /// Create an empty list
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Project this list into its overview form
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            item_count: self.items.len() as u64,
            checked_count: self.items.iter().filter(|item| item.checked).count() as u64,
        }
    }
}

/// Overview of a todo list without item detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// List identifier
    pub id: ListId,
    /// List name
    pub name: String,
    /// Number of items in the list
    pub item_count: u64,
    /// Number of items marked as checked
    pub checked_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_id_parse() {
        let id: ListId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");

        for bad in ["", "not-an-id", "65a1f0c2e4b0a1b2c3d4e5f", "zza1f0c2e4b0a1b2c3d4e5f6"] {
            match bad.parse::<ListId>() {
                Err(AppError::InvalidIdentifier(raw)) => assert_eq!(raw, bad),
                other => panic!("Expected InvalidIdentifier for {bad:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_list_id_serializes_as_hex_string() {
        let id: ListId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("65a1f0c2e4b0a1b2c3d4e5f6"));

        let bad: Result<ListId, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_new_item_is_unchecked_with_unique_id() {
        let a = ToDoListItem::new("Milk");
        let b = ToDoListItem::new("Milk");
        assert!(!a.checked);
        assert_eq!(a.label, "Milk");
        assert_eq!(a.id.len(), 32);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_item_checked_defaults_to_false() {
        let item: ToDoListItem = serde_json::from_str(r#"{"id":"a","label":"Eggs"}"#).unwrap();
        assert!(!item.checked);
    }

    #[test]
    fn test_summary_counts() {
        let mut list = ToDoList::new(ListId::generate(), "Groceries");
        list.items.push(ToDoListItem::new("Milk"));
        list.items.push(ToDoListItem {
            checked: true,
            ..ToDoListItem::new("Eggs")
        });

        let summary = list.summary();
        assert_eq!(summary.id, list.id);
        assert_eq!(summary.name, "Groceries");
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.checked_count, 1);
    }
}
