use chrono::{DateTime, Utc};
use log::info;

use crate::error::{ServiceError, ServiceResult};
use crate::logic::validate::RequestValidator;
use crate::model::{
    normalized_now, normalized_now_after, CreateItemRequest, Id, Item, UpdateItemRequest,
};
use crate::store::traits::ItemStore;

pub struct ItemOperations;

impl ItemOperations {
    /// Create a standalone item.
    ///
    /// The owning user is taken on trust: no check is made that `user_id`
    /// names an existing user.
    pub async fn create_item<S: ItemStore + ?Sized>(
        store: &S,
        request: CreateItemRequest,
    ) -> ServiceResult<Item> {
        RequestValidator::validate_create_item(&request)?;
        let item =
            Self::insert_new(store, request.name, request.user_id, normalized_now()).await?;
        info!("Created item {} for user {}", item.id, item.user_id);
        Ok(item)
    }

    pub async fn get_item<S: ItemStore + ?Sized>(store: &S, id: &Id) -> ServiceResult<Item> {
        store
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::ItemNotFound(id.clone()))
    }

    /// Rename an item. `updated_at` advances even when no name is given.
    pub async fn update_item<S: ItemStore + ?Sized>(
        store: &S,
        id: &Id,
        request: UpdateItemRequest,
    ) -> ServiceResult<Item> {
        let mut item = Self::get_item(store, id).await?;
        let updated_at = normalized_now_after(item.updated_at);
        item.merge(&request, updated_at);
        store.update_item(&item).await?;
        info!("Updated item {}", item.id);
        Ok(item)
    }

    /// Insert an already validated item row stamped with `created_at`
    pub(crate) async fn insert_new<S: ItemStore + ?Sized>(
        store: &S,
        name: String,
        user_id: Id,
        created_at: DateTime<Utc>,
    ) -> ServiceResult<Item> {
        let item = Item::new(name, user_id, created_at);
        store.insert_item(&item).await?;
        Ok(item)
    }
}
