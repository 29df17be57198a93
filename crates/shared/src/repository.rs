//! Persistence seam for items. Any store (SQLite, remote API, test double) plugs in here.

use async_trait::async_trait;

use crate::{
    domain::{Item, ItemId, ItemPatch, UserId},
    error::RepositoryError,
};

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All of the user's items, oldest first.
    async fn list_items(&self, user_id: UserId) -> Result<Vec<Item>, RepositoryError>;

    /// Stores a new inbox item and returns it with its assigned id and timestamp.
    async fn create_item(&self, user_id: UserId, text: &str) -> Result<Item, RepositoryError>;

    async fn update_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: &ItemPatch,
    ) -> Result<(), RepositoryError>;

    async fn delete_item(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError>;
}
