use crate::model::{apply, generate_id, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A child row owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub user_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a fresh item; both timestamps are set to `created_at`.
    pub fn new(name: String, user_id: Id, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name,
            user_id,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply the requested fields of a partial update and advance `updated_at`.
    pub fn merge(&mut self, update: &UpdateItemRequest, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
        apply(&mut self.name, &update.name);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    /// Ignored when the item is created as part of a user
    #[serde(default)]
    pub user_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalized_now;

    #[test]
    fn test_new_item_is_born_with_equal_timestamps() {
        let now = normalized_now();
        let item = Item::new("cat".to_string(), "owner".to_string(), now);

        assert!(!item.id.is_empty());
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.user_id, "owner");
    }

    #[test]
    fn test_merge_without_name_only_advances_updated_at() {
        let born = normalized_now();
        let mut item = Item::new("cat".to_string(), "owner".to_string(), born);
        let later = born + chrono::Duration::seconds(1);

        item.merge(
            &UpdateItemRequest {
                id: item.id.clone(),
                name: None,
            },
            later,
        );

        assert_eq!(item.name, "cat");
        assert_eq!(item.created_at, born);
        assert_eq!(item.updated_at, later);
    }

    #[test]
    fn test_update_request_accepts_missing_name() {
        let update: UpdateItemRequest = serde_json::from_str(r#"{"id": "item-1"}"#).unwrap();
        assert_eq!(update.id, "item-1");
        assert_eq!(update.name, None);
    }
}
