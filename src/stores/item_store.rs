use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::item::{self, ActiveModel, Entity as Item};
use crate::types::internal::FindItemsOptions;

/// Fields for a row inserted in bulk (seeding)
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub is_active: bool,
}

/// ItemStore owns every query against the `item` table
///
/// The store holds no connection; callers pass one in so the same methods
/// work against a pooled connection or an open transaction.
#[derive(Debug, Default)]
pub struct ItemStore {}

impl ItemStore {
    pub fn new() -> Self {
        Self {}
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Insert a new active item with a freshly generated id
    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<item::Model, InternalError> {
        let now = Self::now_millis();
        let new_item = ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            name: Set(name.to_string()),
            name_search: Set(search_key(name)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_item
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_item", e))
    }

    /// Insert many rows at once, returning how many were written
    pub async fn insert_many(
        &self,
        conn: &impl ConnectionTrait,
        items: Vec<NewItem>,
    ) -> Result<u64, InternalError> {
        if items.is_empty() {
            return Ok(0);
        }

        let now = Self::now_millis();
        let models = items.into_iter().map(|new_item| ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            name_search: Set(search_key(&new_item.name)),
            name: Set(new_item.name),
            is_active: Set(new_item.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        });

        Item::insert_many(models)
            .exec_without_returning(conn)
            .await
            .map_err(|e| InternalError::database("insert_items", e))
    }

    /// List items newest first, applying the active filter, name search and offset paging
    pub async fn find_many(
        &self,
        conn: &impl ConnectionTrait,
        options: &FindItemsOptions,
    ) -> Result<Vec<item::Model>, InternalError> {
        let mut query = Item::find();

        if !options.include_inactive {
            query = query.filter(item::Column::IsActive.eq(true));
        }

        if let Some(term) = options.search_term() {
            let pattern = format!("%{}%", escape_like(&search_key(term)));
            query = query.filter(
                Expr::col(item::Column::NameSearch)
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        query
            .order_by_desc(item::Column::CreatedAt)
            .order_by_desc(item::Column::Id)
            .offset(options.skip)
            .limit(options.take)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_items", e))
    }

    /// Count rows with the given id (0 or 1)
    pub async fn count_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
    ) -> Result<u64, InternalError> {
        Item::find()
            .filter(item::Column::Id.eq(id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_item_by_id", e))
    }

    /// Rename an item and bump its `updated_at`
    pub async fn update_name(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
        name: &str,
    ) -> Result<item::Model, InternalError> {
        let changes = ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            name_search: Set(search_key(name)),
            updated_at: Set(Self::now_millis()),
            ..Default::default()
        };

        changes
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_item_name", e))
    }

    /// Set `is_active` on every listed row that is not already in that state
    ///
    /// A single UPDATE statement; returns the number of rows changed.
    pub async fn set_active(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[String],
        active: bool,
    ) -> Result<u64, InternalError> {
        let result = Item::update_many()
            .col_expr(item::Column::IsActive, Expr::value(active))
            .col_expr(item::Column::UpdatedAt, Expr::value(Self::now_millis()))
            .filter(item::Column::Id.is_in(ids.iter().map(String::as_str)))
            .filter(item::Column::IsActive.eq(!active))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("set_items_active", e))?;

        Ok(result.rows_affected)
    }

    /// Physically remove an item, returning the number of rows deleted
    pub async fn delete_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
    ) -> Result<u64, InternalError> {
        let result = Item::delete_by_id(id.to_string())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        Ok(result.rows_affected)
    }

    /// Remove every item, returning the number of rows deleted
    pub async fn delete_all(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        let result = Item::delete_many()
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_all_items", e))?;

        Ok(result.rows_affected)
    }
}

/// Case-folded form of a name, stored alongside it and compared on search
///
/// Folding happens here rather than in SQL because SQLite's `LOWER` only
/// handles ASCII.
fn search_key(name: &str) -> String {
    name.to_lowercase()
}

/// Escape character for LIKE patterns; needs no quoting in any SQL dialect
const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("widget"), "widget");
        assert_eq!(escape_like("50%_off"), "50!%!_off");
        assert_eq!(escape_like("wow!"), "wow!!");
    }

    #[tokio::test]
    async fn test_insert_sets_defaults() {
        let db = setup_test_db().await;
        let store = ItemStore::new();

        let created = store.insert(&db, "Widget A").await.unwrap();

        assert_eq!(created.name, "Widget A");
        assert!(created.is_active);
        assert_eq!(created.created_at, created.updated_at);
        assert!(Uuid::parse_str(&created.id).is_ok());
    }

    #[tokio::test]
    async fn test_set_active_only_touches_rows_in_opposite_state() {
        let db = setup_test_db().await;
        let store = ItemStore::new();
        let a = store.insert(&db, "A").await.unwrap();
        let b = store.insert(&db, "B").await.unwrap();

        let ids = vec![a.id.clone(), b.id.clone()];
        assert_eq!(store.set_active(&db, &ids[..1], false).await.unwrap(), 1);
        // a is already inactive, only b changes
        assert_eq!(store.set_active(&db, &ids, false).await.unwrap(), 1);
        assert_eq!(store.set_active(&db, &ids, false).await.unwrap(), 0);
        assert_eq!(store.set_active(&db, &ids, true).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = setup_test_db().await;
        let store = ItemStore::new();
        store.insert(&db, "50% off bundle").await.unwrap();
        store.insert(&db, "500 bolts").await.unwrap();

        let options = FindItemsOptions::default().search("50%");
        let found = store.find_many(&db, &options).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "50% off bundle");
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = setup_test_db().await;
        let store = ItemStore::new();
        let eclair = store.insert(&db, "ÉCLAIR Deluxe").await.unwrap();
        store.insert(&db, "Plain donut").await.unwrap();

        let found = store
            .find_many(&db, &FindItemsOptions::default().search("éclair"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, eclair.id);
        assert_eq!(found[0].name_search, "éclair deluxe");

        store.update_name(&db, &eclair.id, "Crème BRÛLÉE").await.unwrap();
        let renamed = store
            .find_many(&db, &FindItemsOptions::default().search("BRÛLÉE"))
            .await
            .unwrap();
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed[0].name, "Crème BRÛLÉE");
        let stale = store
            .find_many(&db, &FindItemsOptions::default().search("éclair"))
            .await
            .unwrap();
        assert!(stale.is_empty());
    }

    #[tokio::test]
    async fn test_insert_many_and_delete_all() {
        let db = setup_test_db().await;
        let store = ItemStore::new();

        let written = store
            .insert_many(
                &db,
                vec![
                    NewItem { name: "one".to_string(), is_active: true },
                    NewItem { name: "two".to_string(), is_active: false },
                ],
            )
            .await
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.insert_many(&db, Vec::new()).await.unwrap(), 0);

        assert_eq!(store.delete_all(&db).await.unwrap(), 2);
        let remaining = store
            .find_many(&db, &FindItemsOptions::default().include_inactive(true))
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }
}
