pub mod item_query;

pub use item_query::FindItemsOptions;
