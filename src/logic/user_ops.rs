use log::{error, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::logic::assemble::AggregateAssembler;
use crate::logic::item_ops::ItemOperations;
use crate::logic::merge::AggregateMerger;
use crate::logic::validate::RequestValidator;
use crate::model::{
    normalized_now, normalized_now_after, CreateUserRequest, Id, PageFilter, UpdateUserRequest,
    User,
};
use crate::store::traits::Store;

/// Operations on a user together with the items it owns.
///
/// The user row and its item rows are written one statement at a time with no
/// enclosing transaction. Every check that can reject a request runs before
/// the first write; a storage failure part way through stops the remaining
/// writes and leaves the completed ones in place. Concurrent updates of the
/// same aggregate are not serialized, so overlapping item writes resolve as
/// last-write-wins per row.
pub struct UserOperations;

impl UserOperations {
    pub async fn create_user<S: Store + ?Sized>(
        store: &S,
        request: CreateUserRequest,
    ) -> ServiceResult<User> {
        RequestValidator::validate_create_user(&request)?;

        let created_at = normalized_now();
        let mut user = User::new(request.name, request.age, request.user_type, created_at);
        store.insert_user(&user).await?;

        for item_request in request.items {
            // The caller could not know the new user's id; whatever it sent is replaced
            let item =
                ItemOperations::insert_new(store, item_request.name, user.id.clone(), created_at)
                    .await
                    .map_err(|e| {
                        error!(
                            "Creating user {} stopped after {} of its items: {}",
                            user.id,
                            user.items.len(),
                            e
                        );
                        e
                    })?;
            user.items.push(item);
        }
        user.items.sort_by(|a, b| a.id.cmp(&b.id));

        info!("Created user {} with {} items", user.id, user.items.len());
        Ok(user)
    }

    pub async fn get_user<S: Store + ?Sized>(store: &S, id: &Id) -> ServiceResult<User> {
        let user = store
            .get_user(id)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(id.clone()))?;
        Ok(AggregateAssembler::attach_items(store, user).await?)
    }

    /// A window of users ordered by id; a zero limit yields no users
    pub async fn list_users<S: Store + ?Sized>(
        store: &S,
        page: PageFilter,
    ) -> ServiceResult<Vec<User>> {
        let users = store.list_users(page.limit, page.offset).await?;
        Ok(AggregateAssembler::attach_items_all(store, users).await?)
    }

    pub async fn update_user<S: Store + ?Sized>(
        store: &S,
        id: &Id,
        request: UpdateUserRequest,
    ) -> ServiceResult<User> {
        RequestValidator::validate_update_user(&request)?;

        let current = Self::get_user(store, id).await?;
        let latest = current
            .items
            .iter()
            .map(|item| item.updated_at)
            .fold(current.updated_at, |a, b| a.max(b));
        let updated_at = normalized_now_after(latest);

        let merged = AggregateMerger::merge_user(current, &request, updated_at).map_err(|e| {
            warn!("Rejected update of user {}: {}", id, e);
            e
        })?;

        store.update_user(&merged.user).await?;
        for (written, item) in merged.touched_items().enumerate() {
            store.update_item(item).await.map_err(|e| {
                error!(
                    "Updating user {} stopped after the user row and {} of {} items: {}",
                    id,
                    written,
                    merged.touched.len(),
                    e
                );
                e
            })?;
        }

        info!(
            "Updated user {} and {} of its items",
            id,
            merged.touched.len()
        );
        Ok(merged.user)
    }

    /// Delete the user row. Item rows owned by the user are not removed, and
    /// an id with no row is acknowledged the same as one that was deleted.
    pub async fn delete_user<S: Store + ?Sized>(store: &S, id: &Id) -> ServiceResult<()> {
        if store.delete_user(id).await? {
            info!("Deleted user {}", id);
        } else {
            info!("Delete of user {} matched no row", id);
        }
        Ok(())
    }
}
