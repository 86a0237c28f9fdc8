//! Client side of the item catalog
//!
//! `ItemClient` talks to the REST API, `ItemListController` holds the list
//! screen state without doing any I/O, and the `catalog-tui` binary wires the
//! two together in a terminal UI.

pub mod api;
pub mod debounce;
pub mod error;
pub mod form;
pub mod list_controller;
pub mod toast;
pub mod types;

pub use api::ItemClient;
pub use debounce::SearchDebouncer;
pub use error::ClientError;
pub use form::{FormMode, ItemForm, NameError};
pub use list_controller::{
    BulkAction, Command, FetchMode, FetchRequest, ItemListController, ListState, Outcome,
    PAGE_SIZE,
};
pub use toast::{Severity, Toast, ToastQueue};
pub use types::{Item, ListParams};
