use crate::model::{apply, generate_id, CreateItemRequest, Id, Item, Unset, UpdateItemRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Reserved tag; never persisted
    #[default]
    Invalid,
    Customer,
    Admin,
}

impl UserType {
    /// Integer tag stored in the `type` column
    pub fn as_i32(self) -> i32 {
        match self {
            UserType::Invalid => 0,
            UserType::Customer => 1,
            UserType::Admin => 2,
        }
    }
}

impl TryFrom<i32> for UserType {
    type Error = anyhow::Error;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(UserType::Invalid),
            1 => Ok(UserType::Customer),
            2 => Ok(UserType::Admin),
            other => Err(anyhow::anyhow!("Unknown user type tag: {}", other)),
        }
    }
}

impl Unset for UserType {
    fn is_unset(&self) -> bool {
        *self == UserType::Invalid
    }
}

/// A user together with the items it owns.
///
/// Rows read through `UserStore` come back with `items` empty; the assembler
/// attaches children in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub age: i32,
    pub user_type: UserType,
    #[serde(default)]
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, age: i32, user_type: UserType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name,
            age,
            user_type,
            items: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply the requested scalar fields and advance `updated_at`.
    ///
    /// Children are left alone; see `logic::merge` for the aggregate merge.
    pub fn merge_fields(&mut self, update: &UpdateUserRequest, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
        apply(&mut self.name, &update.name);
        apply(&mut self.age, &update.age);
        apply(&mut self.user_type, &update.user_type);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub items: Vec<CreateItemRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub items: Vec<UpdateItemRequest>,
}

/// Window over users ordered by id. `offset` counts rows, not pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFilter {
    #[serde(default)]
    pub limit: u32,
    #[serde(default, alias = "page")]
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUserResponse {
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalized_now;

    #[test]
    fn test_user_type_tags_round_trip() {
        for user_type in [UserType::Invalid, UserType::Customer, UserType::Admin] {
            assert_eq!(UserType::try_from(user_type.as_i32()).unwrap(), user_type);
        }
        assert!(UserType::try_from(42).is_err());
    }

    #[test]
    fn test_user_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&UserType::Customer).unwrap(),
            "\"CUSTOMER\""
        );
        let parsed: CreateUserRequest =
            serde_json::from_str(r#"{"name": "John Doe", "age": 14}"#).unwrap();
        assert_eq!(parsed.user_type, UserType::Invalid);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_merge_fields_ignores_sentinels() {
        let born = normalized_now();
        let mut user = User::new("John Doe".to_string(), 14, UserType::Customer, born);
        let later = born + chrono::Duration::milliseconds(5);

        user.merge_fields(
            &UpdateUserRequest {
                name: Some(String::new()),
                age: Some(0),
                user_type: Some(UserType::Invalid),
                items: Vec::new(),
            },
            later,
        );

        assert_eq!(user.name, "John Doe");
        assert_eq!(user.age, 14);
        assert_eq!(user.user_type, UserType::Customer);
        assert_eq!(user.updated_at, later);
        assert_eq!(user.created_at, born);
    }

    #[test]
    fn test_merge_fields_applies_requested_values() {
        let born = normalized_now();
        let mut user = User::new("John Doe".to_string(), 14, UserType::Customer, born);

        user.merge_fields(
            &UpdateUserRequest {
                name: Some("John Doe_updated".to_string()),
                age: Some(666),
                user_type: Some(UserType::Admin),
                items: Vec::new(),
            },
            born,
        );

        assert_eq!(user.name, "John Doe_updated");
        assert_eq!(user.age, 666);
        assert_eq!(user.user_type, UserType::Admin);
    }

    #[test]
    fn test_page_filter_accepts_page_alias() {
        let filter: PageFilter = serde_json::from_str(r#"{"limit": 3, "page": 2}"#).unwrap();
        assert_eq!(filter, PageFilter { limit: 3, offset: 2 });

        let empty: PageFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.limit, 0);
    }
}
