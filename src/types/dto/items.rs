use chrono::{DateTime, SecondsFormat, Utc};
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};

use crate::errors::InternalError;
use crate::types::db::item;

/// Request model for creating a new item
#[derive(Object, Debug)]
#[oai(deny_unknown_fields)]
pub struct CreateItemRequest {
    /// Name of the item (1-255 characters)
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,
}

/// Request model for renaming an item
#[derive(Object, Debug)]
#[oai(deny_unknown_fields)]
pub struct UpdateItemNameRequest {
    /// New name for the item (1-255 characters)
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,
}

/// Request model for bulk activate/deactivate
#[derive(Object, Debug)]
#[oai(deny_unknown_fields)]
pub struct BulkActionRequest {
    /// IDs of the items to update
    #[oai(validator(min_items = 1))]
    pub ids: Vec<String>,
}

/// Number of rows a bulk action changed
#[derive(Object, Debug)]
pub struct BulkActionResponse {
    pub count: u64,
}

/// Response model representing an item
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,

    /// Name of the item
    pub name: String,

    /// Whether the item is active
    pub is_active: bool,

    /// Creation timestamp (ISO 8601 format)
    pub created_at: String,

    /// Last update timestamp (ISO 8601 format)
    pub updated_at: String,
}

fn format_millis(millis: i64) -> Result<String, InternalError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| InternalError::parse("timestamp", format!("{} is out of range", millis)))
}

impl TryFrom<item::Model> for ItemResponse {
    type Error = InternalError;

    fn try_from(model: item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: format_millis(model.created_at)?,
            updated_at: format_millis(model.updated_at)?,
            id: model.id,
            name: model.name,
            is_active: model.is_active,
        })
    }
}

#[derive(ApiResponse)]
pub enum ListItemsApiResponse {
    /// Items listed, newest first
    #[oai(status = 200)]
    Ok(Json<Vec<ItemResponse>>),
}

#[derive(ApiResponse)]
pub enum CreateItemApiResponse {
    /// Item created
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}

#[derive(ApiResponse)]
pub enum UpdateItemNameApiResponse {
    /// Name updated
    #[oai(status = 200)]
    Ok(Json<ItemResponse>),
}

#[derive(ApiResponse)]
pub enum BulkActionApiResponse {
    /// Number of items whose status changed
    #[oai(status = 200)]
    Ok(Json<BulkActionResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteItemApiResponse {
    /// Item removed
    #[oai(status = 204)]
    NoContent,
}
