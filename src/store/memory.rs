use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::model::{Id, Item, User};
use crate::store::traits::{ItemStore, Store, UserStore};

/// Process-local store with the same row semantics as `PostgresStore`.
///
/// Rows are kept in id-ordered maps so listings come back in the order the
/// SQL queries impose. Updates of missing rows are silently ignored, like an
/// `UPDATE` matching nothing.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<BTreeMap<Id, User>>,
    items: RwLock<BTreeMap<Id, Item>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn get_user(&self, id: &Id) -> Result<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn list_users(&self, limit: u32, offset: u32) -> Result<Vec<User>> {
        let users = self.users.read();
        Ok(users
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(&user.id) {
            return Err(anyhow!("Failed to insert user: duplicate id {}", user.id));
        }
        let mut row = user.clone();
        row.items.clear();
        users.insert(row.id.clone(), row);
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        if let Some(row) = self.users.write().get_mut(&user.id) {
            row.name = user.name.clone();
            row.age = user.age;
            row.user_type = user.user_type;
            row.updated_at = user.updated_at;
        }
        Ok(())
    }

    async fn delete_user(&self, id: &Id) -> Result<bool> {
        Ok(self.users.write().remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl ItemStore for InMemoryStore {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn list_items_for_user(&self, user_id: &Id) -> Result<Vec<Item>> {
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| &item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_item(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write();
        if items.contains_key(&item.id) {
            return Err(anyhow!("Failed to insert item: duplicate id {}", item.id));
        }
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &Item) -> Result<()> {
        if let Some(row) = self.items.write().get_mut(&item.id) {
            row.name = item.name.clone();
            row.updated_at = item.updated_at;
        }
        Ok(())
    }
}

impl Store for InMemoryStore {}
