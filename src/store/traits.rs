use crate::model::{Id, Item, User};
use anyhow::Result;

/// Row-level access to the `users` table.
///
/// Users returned here never carry items; the assembler attaches them.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &Id) -> Result<Option<User>>;
    /// Users ordered by id, `limit` rows starting at row `offset`
    async fn list_users(&self, limit: u32, offset: u32) -> Result<Vec<User>>;
    async fn insert_user(&self, user: &User) -> Result<()>;
    /// Persist name, age, type and updated_at of an existing row
    async fn update_user(&self, user: &User) -> Result<()>;
    /// Remove the user row only; owned item rows are left in place
    async fn delete_user(&self, id: &Id) -> Result<bool>;
}

/// Row-level access to the `items` table
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>>;
    /// Items owned by `user_id`, ordered by id
    async fn list_items_for_user(&self, user_id: &Id) -> Result<Vec<Item>>;
    /// Insert a row; `item.user_id` is not checked against `users`
    async fn insert_item(&self, item: &Item) -> Result<()>;
    /// Persist name and updated_at of an existing row
    async fn update_item(&self, item: &Item) -> Result<()>;
}

pub trait Store: UserStore + ItemStore + Send + Sync {}
