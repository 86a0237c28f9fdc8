use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::ItemProvider;
use crate::types::dto::items::{BulkActionResponse, ItemResponse};
use crate::types::internal::FindItemsOptions;

/// Orchestrates item workflows for the HTTP layer
///
/// Picks the connection, calls the provider and shapes results into DTOs.
pub struct ItemCoordinator {
    db: DatabaseConnection,
    item_provider: Arc<ItemProvider>,
}

impl ItemCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.connections.catalog.clone(),
            item_provider: Arc::clone(&app_data.item_provider),
        }
    }

    pub async fn list_items(
        &self,
        options: FindItemsOptions,
    ) -> Result<Vec<ItemResponse>, InternalError> {
        let items = self.item_provider.find_many(&self.db, &options).await?;

        items.into_iter().map(ItemResponse::try_from).collect()
    }

    pub async fn create_item(&self, name: &str) -> Result<ItemResponse, InternalError> {
        let created = self.item_provider.create(&self.db, name).await?;

        ItemResponse::try_from(created)
    }

    pub async fn update_item_name(
        &self,
        id: &str,
        name: &str,
    ) -> Result<ItemResponse, InternalError> {
        let updated = self.item_provider.update_name(&self.db, id, name).await?;

        ItemResponse::try_from(updated)
    }

    pub async fn bulk_deactivate(&self, ids: &[String]) -> Result<BulkActionResponse, InternalError> {
        let count = self.item_provider.bulk_deactivate(&self.db, ids).await?;

        Ok(BulkActionResponse { count })
    }

    pub async fn bulk_activate(&self, ids: &[String]) -> Result<BulkActionResponse, InternalError> {
        let count = self.item_provider.bulk_activate(&self.db, ids).await?;

        Ok(BulkActionResponse { count })
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), InternalError> {
        self.item_provider.delete(&self.db, id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ItemError;
    use crate::test::utils::setup_test_app_data;

    #[tokio::test]
    async fn test_created_item_is_shaped_for_the_api() {
        let coordinator = ItemCoordinator::new(setup_test_app_data().await);

        let created = coordinator.create_item("Widget A").await.unwrap();

        assert_eq!(created.name, "Widget A");
        assert!(created.is_active);
        assert!(created.created_at.ends_with('Z'));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_bulk_deactivate_reports_count() {
        let coordinator = ItemCoordinator::new(setup_test_app_data().await);
        let a = coordinator.create_item("A").await.unwrap();

        let result = coordinator
            .bulk_deactivate(&[a.id.clone(), "missing-id".to_string()])
            .await
            .unwrap();
        assert_eq!(result.count, 1);

        let visible = coordinator.list_items(FindItemsOptions::default()).await.unwrap();
        assert!(visible.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let coordinator = ItemCoordinator::new(setup_test_app_data().await);

        let result = coordinator.delete_item("missing-id").await;

        assert!(matches!(result, Err(InternalError::Item(ItemError::NotFound { .. }))));
    }
}
