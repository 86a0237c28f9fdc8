// Stores layer - Database access
//
// Stores own the sea-orm queries for one table each and hold no connection.

pub mod item_store;

pub use item_store::{ItemStore, NewItem};
