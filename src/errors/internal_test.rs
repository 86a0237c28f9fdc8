#[cfg(test)]
mod tests {
    use crate::errors::internal::{DatabaseError, InternalError, ItemError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("insert_item", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("insert_item"));
        assert!(error_string.contains("Database error"));
        assert!(matches!(error, InternalError::Database(DatabaseError::Operation { .. })));
    }

    #[test]
    fn test_transaction_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test".to_string());
        let error = InternalError::transaction("seed_items", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("seed_items"));
        assert!(error_string.contains("Transaction error"));
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("timestamp", "out of range");

        let error_string = error.to_string();
        assert!(error_string.contains("timestamp"));
        assert!(error_string.contains("out of range"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_item_not_found_message() {
        let error = ItemError::not_found("item-123");
        assert_eq!(error.to_string(), "Item not found: item-123");
    }

    #[test]
    fn test_item_errors_are_transparent() {
        let error: InternalError = ItemError::EmptyName.into();
        assert_eq!(error.to_string(), "Item name must not be empty");
    }
}
