use thiserror::Error;

pub mod database;
pub mod item;

pub use database::DatabaseError;
pub use item::ItemError;

/// Internal error type for store and provider operations
///
/// Separates infrastructure errors (database, parsing) from item domain
/// errors. Not exposed via API - endpoints must convert to `ItemApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Create a transaction error with context
    pub fn transaction(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Transaction {
            operation: operation.to_string(),
            source,
        })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }
}
