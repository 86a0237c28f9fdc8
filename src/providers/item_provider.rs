use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::internal::{InternalError, ItemError};
use crate::stores::ItemStore;
use crate::types::db::item;
use crate::types::internal::FindItemsOptions;

/// Business rules for the item catalog
///
/// Wraps `ItemStore` with name validation, existence checks and logging.
/// Errors are logged here and returned unchanged so the API layer can map them.
pub struct ItemProvider {
    item_store: Arc<ItemStore>,
}

impl ItemProvider {
    pub fn new(item_store: Arc<ItemStore>) -> Self {
        Self { item_store }
    }

    fn validate_name(name: &str) -> Result<(), InternalError> {
        if name.trim().is_empty() {
            return Err(ItemError::EmptyName.into());
        }
        Ok(())
    }

    /// Fail with `ItemError::NotFound` unless a row with `id` exists
    async fn verify_item_exists(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
    ) -> Result<(), InternalError> {
        let count = self.item_store.count_by_id(conn, id).await?;
        if count == 0 {
            tracing::warn!(item_id = %id, "Item not found");
            return Err(ItemError::not_found(id).into());
        }
        Ok(())
    }

    /// Create a new active item
    ///
    /// # Errors
    /// * `ItemError::EmptyName` - name is empty or whitespace only
    /// * `InternalError::Database` - insert failed
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<item::Model, InternalError> {
        Self::validate_name(name)?;

        match self.item_store.insert(conn, name).await {
            Ok(created) => {
                tracing::info!(item_id = %created.id, name = %created.name, "Item created");
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Failed to create item: {}", e);
                Err(e)
            }
        }
    }

    /// List items newest first with optional search and inactive rows
    pub async fn find_many(
        &self,
        conn: &impl ConnectionTrait,
        options: &FindItemsOptions,
    ) -> Result<Vec<item::Model>, InternalError> {
        match self.item_store.find_many(conn, options).await {
            Ok(items) => {
                tracing::debug!(
                    skip = options.skip,
                    take = options.take,
                    include_inactive = options.include_inactive,
                    search = ?options.search_term(),
                    returned = items.len(),
                    "Listed items"
                );
                Ok(items)
            }
            Err(e) => {
                tracing::error!("Failed to list items: {}", e);
                Err(e)
            }
        }
    }

    /// Rename an existing item
    ///
    /// # Errors
    /// * `ItemError::EmptyName` - name is empty or whitespace only
    /// * `ItemError::NotFound` - no item with this id
    pub async fn update_name(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
        name: &str,
    ) -> Result<item::Model, InternalError> {
        Self::validate_name(name)?;
        self.verify_item_exists(conn, id).await?;

        match self.item_store.update_name(conn, id, name).await {
            Ok(updated) => {
                tracing::info!(item_id = %id, name = %updated.name, "Item renamed");
                Ok(updated)
            }
            Err(e) => {
                tracing::error!(item_id = %id, "Failed to rename item: {}", e);
                Err(e)
            }
        }
    }

    /// Deactivate every listed item that is currently active
    ///
    /// Unknown ids and rows already inactive are skipped. Returns the number of rows changed.
    pub async fn bulk_deactivate(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[String],
    ) -> Result<u64, InternalError> {
        self.set_active(conn, ids, false).await
    }

    /// Activate every listed item that is currently inactive
    pub async fn bulk_activate(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[String],
    ) -> Result<u64, InternalError> {
        self.set_active(conn, ids, true).await
    }

    async fn set_active(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[String],
        active: bool,
    ) -> Result<u64, InternalError> {
        let action = if active { "activate" } else { "deactivate" };

        if ids.is_empty() {
            tracing::debug!("Bulk {} called with no ids", action);
            return Ok(0);
        }

        match self.item_store.set_active(conn, ids, active).await {
            Ok(count) => {
                tracing::info!(requested = ids.len(), changed = count, "Bulk {} completed", action);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Bulk {} failed: {}", action, e);
                Err(e)
            }
        }
    }

    /// Permanently remove an item
    ///
    /// # Errors
    /// * `ItemError::NotFound` - no item with this id
    pub async fn delete(&self, conn: &impl ConnectionTrait, id: &str) -> Result<bool, InternalError> {
        self.verify_item_exists(conn, id).await?;

        match self.item_store.delete_by_id(conn, id).await {
            Ok(deleted) => {
                tracing::info!(item_id = %id, "Item deleted");
                Ok(deleted > 0)
            }
            Err(e) => {
                tracing::error!(item_id = %id, "Failed to delete item: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_db, setup_test_item_provider};

    #[tokio::test]
    async fn test_create_rejects_blank_names() {
        let db = setup_test_db().await;
        let provider = setup_test_item_provider();

        for name in ["", "   ", "\t\n"] {
            let result = provider.create(&db, name).await;
            assert!(matches!(result, Err(InternalError::Item(ItemError::EmptyName))));
        }
    }

    #[tokio::test]
    async fn test_update_name_on_missing_item_is_not_found() {
        let db = setup_test_db().await;
        let provider = setup_test_item_provider();

        let result = provider.update_name(&db, "missing-id", "New name").await;

        match result {
            Err(InternalError::Item(ItemError::NotFound { id })) => assert_eq!(id, "missing-id"),
            other => panic!("Expected NotFound, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_name_bumps_updated_at() {
        let db = setup_test_db().await;
        let provider = setup_test_item_provider();
        let created = provider.create(&db, "Old name").await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = provider.update_name(&db, &created.id, "New name").await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New name");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_bulk_with_no_ids_returns_zero() {
        let db = setup_test_db().await;
        let provider = setup_test_item_provider();
        provider.create(&db, "Untouched").await.unwrap();

        assert_eq!(provider.bulk_deactivate(&db, &[]).await.unwrap(), 0);
        assert_eq!(provider.bulk_activate(&db, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = setup_test_db().await;
        let provider = setup_test_item_provider();
        let created = provider.create(&db, "Short lived").await.unwrap();

        assert!(provider.delete(&db, &created.id).await.unwrap());

        let again = provider.delete(&db, &created.id).await;
        assert!(matches!(again, Err(InternalError::Item(ItemError::NotFound { .. }))));
    }
}
