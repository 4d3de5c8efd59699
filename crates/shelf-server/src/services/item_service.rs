//! Item catalogue service
//!
//! Owns the in-memory item collection. Reads share the lock; create, update
//! and delete hold the write lock for the whole scan-and-mutate so two
//! concurrent creates can never be handed the same id.

use shelf_core::{Item, ItemPatch, NewItem, ResourceCollection, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Default)]
pub struct ItemService {
    items: RwLock<ResourceCollection<Item>>,
}

impl ItemService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_items(&self) -> Vec<Item> {
        self.items.read().await.list().to_vec()
    }

    pub async fn create_item(&self, new_item: NewItem) -> Item {
        let item = self.items.write().await.create(new_item);
        info!("Created item: id={}, name={}", item.id, item.name);
        item
    }

    pub async fn get_item(&self, id: i64) -> Result<Item> {
        debug!("Fetching item {}", id);
        self.items.read().await.get(id).cloned()
    }

    pub async fn update_item(&self, id: i64, patch: ItemPatch) -> Result<Item> {
        let item = self.items.write().await.update(id, patch)?;
        info!("Updated item: id={}", id);
        Ok(item)
    }

    pub async fn delete_item(&self, id: i64) -> Result<Item> {
        let item = self.items.write().await.delete(id)?;
        info!("Deleted item: id={}", id);
        Ok(item)
    }
}
