//! In-memory merge of a partial user update into a loaded aggregate.
//!
//! Nothing in here touches storage. Callers load the aggregate, merge, and
//! only start writing once the merge has succeeded, so a request naming an
//! item outside the aggregate is rejected before any row changes.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::collections::HashMap;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Id, UpdateUserRequest, User};

/// Result of merging an update into a user aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct MergedUser {
    pub user: User,
    /// Positions in `user.items` of the children the update touched, in
    /// aggregate order
    pub touched: Vec<usize>,
}

impl MergedUser {
    pub fn touched_items(&self) -> impl Iterator<Item = &crate::model::Item> {
        self.touched
            .iter()
            .filter_map(|&index| self.user.items.get(index))
    }
}

pub struct AggregateMerger;

impl AggregateMerger {
    /// Merge `update` into `user`, stamping every touched row with `updated_at`.
    ///
    /// Fails with `DuplicateItemUpdate` when one item id is listed twice and
    /// with `InconsistentRequest` when any listed id is not one of the user's
    /// items. On failure the aggregate is dropped unchanged from the caller's
    /// point of view since it was taken by value.
    pub fn merge_user(
        mut user: User,
        update: &UpdateUserRequest,
        updated_at: DateTime<Utc>,
    ) -> ServiceResult<MergedUser> {
        if let Some(duplicate) = update.items.iter().map(|item| &item.id).duplicates().next() {
            return Err(ServiceError::DuplicateItemUpdate(duplicate.clone()));
        }

        let requested: HashMap<&str, _> = update
            .items
            .iter()
            .map(|item| (item.id.as_str(), item))
            .collect();

        let mut touched = Vec::with_capacity(requested.len());
        for (index, item) in user.items.iter_mut().enumerate() {
            if let Some(item_update) = requested.get(item.id.as_str()) {
                touched.push(index);
                item.merge(item_update, updated_at);
            }
        }

        if touched.len() < requested.len() {
            let unknown: Vec<Id> = update
                .items
                .iter()
                .filter(|item| !user.items.iter().any(|owned| owned.id == item.id))
                .map(|item| item.id.clone())
                .collect();
            return Err(ServiceError::InconsistentRequest {
                user_id: user.id,
                item_ids: unknown,
            });
        }

        user.merge_fields(update, updated_at);

        Ok(MergedUser { user, touched })
    }
}
