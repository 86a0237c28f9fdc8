use crate::errors::internal::{InternalError, ItemError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Item endpoint error types
///
/// Request parsing and validation failures raised by poem-openapi before a
/// handler runs are routed through `bad_request_handler`, so every error body
/// shares the `ErrorResponse` shape.
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "bad_request_handler")]
pub enum ItemApiError {
    /// Malformed or invalid input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Item not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn bad_request_handler(err: poem::Error) -> ItemApiError {
    ItemApiError::bad_request(err.to_string())
}

impl ItemApiError {
    /// Create a BadRequest error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ItemApiError::BadRequest(Json(ErrorResponse {
            error: "bad_request".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(item_id: &str) -> Self {
        ItemApiError::NotFound(Json(ErrorResponse {
            error: "item_not_found".to_string(),
            message: format!("Item not found: {}", item_id),
            status_code: 404,
        }))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Item(ItemError::NotFound { id }) => Self::not_found(id),
            InternalError::Item(ItemError::EmptyName) => Self::bad_request(err.to_string()),
            InternalError::Database(_) => {
                tracing::error!("Database error in item operation: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal server error, never carries internal details
    fn internal_server_error() -> Self {
        ItemApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            ItemApiError::BadRequest(json)
            | ItemApiError::NotFound(json)
            | ItemApiError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
