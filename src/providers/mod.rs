// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. They take a connection per call so the same
// operation can run inside or outside a transaction.

pub mod item_provider;

pub use item_provider::ItemProvider;
