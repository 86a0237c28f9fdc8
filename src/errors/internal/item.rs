use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Item name must not be empty")]
    EmptyName,
}

impl ItemError {
    pub fn not_found(id: impl Into<String>) -> Self {
        ItemError::NotFound { id: id.into() }
    }
}
