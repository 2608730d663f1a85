use anyhow::Result;

use crate::model::User;
use crate::store::traits::ItemStore;

pub struct AggregateAssembler;

impl AggregateAssembler {
    /// Replace the user's item list with every stored item it owns, in id order
    pub async fn attach_items<S: ItemStore + ?Sized>(store: &S, mut user: User) -> Result<User> {
        user.items = store.list_items_for_user(&user.id).await?;
        Ok(user)
    }

    /// Attach items to each user in turn, keeping the input order
    pub async fn attach_items_all<S: ItemStore + ?Sized>(
        store: &S,
        users: Vec<User>,
    ) -> Result<Vec<User>> {
        let mut assembled = Vec::with_capacity(users.len());
        for user in users {
            assembled.push(Self::attach_items(store, user).await?);
        }
        Ok(assembled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{normalized_now, Item, UserType};
    use crate::store::{InMemoryStore, UserStore};

    #[tokio::test]
    async fn test_attach_items_only_picks_owned_items() {
        let store = InMemoryStore::new();
        let now = normalized_now();
        let owner = User::new("owner".to_string(), 20, UserType::Customer, now);
        let other = User::new("other".to_string(), 21, UserType::Admin, now);
        store.insert_user(&owner).await.unwrap();
        store.insert_user(&other).await.unwrap();

        for name in ["b", "a", "c"] {
            store
                .insert_item(&Item::new(name.to_string(), owner.id.clone(), now))
                .await
                .unwrap();
        }
        store
            .insert_item(&Item::new("x".to_string(), other.id.clone(), now))
            .await
            .unwrap();

        let assembled = AggregateAssembler::attach_items(&store, owner.clone())
            .await
            .unwrap();

        assert_eq!(assembled.items.len(), 3);
        assert!(assembled.items.iter().all(|item| item.user_id == owner.id));
        assert!(assembled
            .items
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn test_user_without_items_gets_empty_list() {
        let store = InMemoryStore::new();
        let user = User::new("lonely".to_string(), 40, UserType::Customer, normalized_now());

        let assembled = AggregateAssembler::attach_items_all(&store, vec![user])
            .await
            .unwrap();

        assert_eq!(assembled.len(), 1);
        assert!(assembled[0].items.is_empty());
    }
}
