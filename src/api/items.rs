use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::coordinators::ItemCoordinator;
use crate::errors::ItemApiError;
use crate::types::dto::items::{
    BulkActionApiResponse, BulkActionRequest, CreateItemApiResponse, CreateItemRequest,
    DeleteItemApiResponse, ListItemsApiResponse, UpdateItemNameApiResponse, UpdateItemNameRequest,
};
use crate::types::internal::FindItemsOptions;

/// Page size used when the client does not send `take`
const DEFAULT_PAGE_SIZE: u64 = 20;

/// Item catalog API endpoints
pub struct ItemsApi {
    item_coordinator: Arc<ItemCoordinator>,
}

impl ItemsApi {
    pub fn new(item_coordinator: Arc<ItemCoordinator>) -> Self {
        Self { item_coordinator }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Item catalog administration
    Items,
}

#[OpenApi]
impl ItemsApi {
    /// List items
    ///
    /// Newest first. Inactive items are hidden unless `includeInactive=true`;
    /// `search` matches names case-insensitively. `take` is capped at 100.
    #[oai(path = "/items", method = "get", tag = "ItemTags::Items")]
    async fn list_items(
        &self,
        // Offsets are bound as signed 64-bit integers
        #[oai(validator(maximum(value = "1000000000")))]
        skip: Query<Option<u64>>,
        #[oai(validator(maximum(value = "100")))]
        take: Query<Option<u64>>,
        search: Query<Option<String>>,
        #[oai(name = "includeInactive")]
        include_inactive: Query<Option<bool>>,
    ) -> Result<ListItemsApiResponse, ItemApiError> {
        let mut options = FindItemsOptions::default()
            .skip(skip.0.unwrap_or(0))
            .take(take.0.unwrap_or(DEFAULT_PAGE_SIZE))
            .include_inactive(include_inactive.0.unwrap_or(false));
        if let Some(term) = search.0 {
            options = options.search(term);
        }

        let items = self.item_coordinator.list_items(options).await?;

        Ok(ListItemsApiResponse::Ok(Json(items)))
    }

    /// Create an item
    ///
    /// New items start active.
    #[oai(path = "/items", method = "post", tag = "ItemTags::Items")]
    async fn create_item(
        &self,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemApiResponse, ItemApiError> {
        let created = self.item_coordinator.create_item(&body.name).await?;

        Ok(CreateItemApiResponse::Created(Json(created)))
    }

    /// Deactivate items
    ///
    /// Returns how many active items were switched off. Unknown ids are ignored.
    #[oai(path = "/items/bulk/deactivate", method = "patch", tag = "ItemTags::Items")]
    async fn bulk_deactivate(
        &self,
        body: Json<BulkActionRequest>,
    ) -> Result<BulkActionApiResponse, ItemApiError> {
        let result = self.item_coordinator.bulk_deactivate(&body.ids).await?;

        Ok(BulkActionApiResponse::Ok(Json(result)))
    }

    /// Activate items
    ///
    /// Returns how many inactive items were switched on. Unknown ids are ignored.
    #[oai(path = "/items/bulk/activate", method = "patch", tag = "ItemTags::Items")]
    async fn bulk_activate(
        &self,
        body: Json<BulkActionRequest>,
    ) -> Result<BulkActionApiResponse, ItemApiError> {
        let result = self.item_coordinator.bulk_activate(&body.ids).await?;

        Ok(BulkActionApiResponse::Ok(Json(result)))
    }

    /// Rename an item
    #[oai(path = "/items/:id/name", method = "patch", tag = "ItemTags::Items")]
    async fn update_item_name(
        &self,
        id: Path<String>,
        body: Json<UpdateItemNameRequest>,
    ) -> Result<UpdateItemNameApiResponse, ItemApiError> {
        let updated = self
            .item_coordinator
            .update_item_name(&id.0, &body.name)
            .await?;

        Ok(UpdateItemNameApiResponse::Ok(Json(updated)))
    }

    /// Delete an item
    ///
    /// Physically removes the row.
    #[oai(path = "/items/:id", method = "delete", tag = "ItemTags::Items")]
    async fn delete_item(&self, id: Path<String>) -> Result<DeleteItemApiResponse, ItemApiError> {
        self.item_coordinator.delete_item(&id.0).await?;

        Ok(DeleteItemApiResponse::NoContent)
    }
}
