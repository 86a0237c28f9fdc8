//! List screen state machine
//!
//! The controller never performs I/O. User intents return a [`Command`] for the
//! caller to execute; the caller feeds the result back as an [`Outcome`]. Each
//! reset fetch bumps a generation counter so responses for superseded fetches
//! are dropped when they arrive.

use std::collections::BTreeSet;

use crate::error::ClientError;
use crate::form::{validate_name, FormMode, ItemForm};
use crate::toast::Toast;
use crate::types::{Item, ListParams};

/// Items requested per page
pub const PAGE_SIZE: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// A reset fetch is in flight; the previous items stay visible
    InitialLoading,
    Idle,
    /// A next-page fetch is in flight
    LoadingMore,
    /// The last reset fetch failed before any page had loaded
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Replace the item set
    Reset,
    /// Append to the item set
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub mode: FetchMode,
    pub params: ListParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Activate,
    Deactivate,
}

impl BulkAction {
    pub fn verb(&self) -> &'static str {
        match self {
            BulkAction::Activate => "activate",
            BulkAction::Deactivate => "deactivate",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            BulkAction::Activate => "activated",
            BulkAction::Deactivate => "deactivated",
        }
    }
}

/// Work the caller must perform against the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(FetchRequest),
    Bulk { action: BulkAction, ids: Vec<String> },
    Create { name: String },
    UpdateName { id: String, name: String },
    Delete { id: String },
}

/// Result of executing a [`Command`]
#[derive(Debug)]
pub enum Outcome {
    Fetched {
        request: FetchRequest,
        result: Result<Vec<Item>, ClientError>,
    },
    BulkCompleted {
        action: BulkAction,
        result: Result<u64, ClientError>,
    },
    Created {
        result: Result<Item, ClientError>,
    },
    Renamed {
        result: Result<Item, ClientError>,
    },
    Deleted {
        id: String,
        result: Result<(), ClientError>,
    },
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        "item"
    } else {
        "items"
    }
}

#[derive(Debug)]
pub struct ItemListController {
    items: Vec<Item>,
    state: ListState,
    /// State to return to if the in-flight reset fails
    state_before_reset: ListState,
    has_more: bool,
    generation: u64,
    search: String,
    include_inactive: bool,
    selection: BTreeSet<String>,
    pending_bulk: Option<BulkAction>,
    form: Option<ItemForm>,
    toasts: Vec<Toast>,
}

impl Default for ItemListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemListController {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            state: ListState::InitialLoading,
            state_before_reset: ListState::Error,
            has_more: false,
            generation: 0,
            search: String::new(),
            include_inactive: false,
            selection: BTreeSet::new(),
            pending_bulk: None,
            form: None,
            toasts: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn include_inactive(&self) -> bool {
        self.include_inactive
    }

    fn params(&self, skip: u64) -> ListParams {
        ListParams {
            skip,
            take: PAGE_SIZE,
            search: Some(self.search.clone()).filter(|term| !term.is_empty()),
            include_inactive: self.include_inactive,
        }
    }

    /// Start a fetch from offset 0 that will replace the item set
    fn reset(&mut self) -> Command {
        self.generation += 1;
        self.state_before_reset = match self.state {
            // A superseded load-more leaves the loaded pages usable
            ListState::LoadingMore => ListState::Idle,
            // Nothing has loaded yet
            ListState::InitialLoading => self.state_before_reset,
            other => other,
        };
        self.state = ListState::InitialLoading;

        Command::Fetch(FetchRequest {
            generation: self.generation,
            mode: FetchMode::Reset,
            params: self.params(0),
        })
    }

    /// Reload the list from the first page
    pub fn refresh(&mut self) -> Command {
        self.reset()
    }

    /// Flip the "show inactive" filter and reload
    pub fn toggle_include_inactive(&mut self) -> Command {
        self.include_inactive = !self.include_inactive;
        self.reset()
    }

    /// Apply a settled search term; no fetch when it did not change
    pub fn set_search(&mut self, term: impl Into<String>) -> Option<Command> {
        let term = term.into();
        if term == self.search {
            return None;
        }
        self.search = term;
        Some(self.reset())
    }

    /// The view scrolled near the end of the loaded items
    ///
    /// Only starts a fetch when idle and the last page was full.
    pub fn scrolled_near_bottom(&mut self) -> Option<Command> {
        if self.state != ListState::Idle || !self.has_more {
            return None;
        }
        self.state = ListState::LoadingMore;

        Some(Command::Fetch(FetchRequest {
            generation: self.generation,
            mode: FetchMode::Append,
            params: self.params(self.items.len() as u64),
        }))
    }

    // Selection

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.iter().cloned().collect()
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Select every loaded item
    pub fn select_all(&mut self) {
        self.selection
            .extend(self.items.iter().map(|item| item.id.clone()));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// True when every loaded item is selected
    pub fn all_loaded_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| self.selection.contains(&item.id))
    }

    // Bulk actions

    pub fn pending_bulk(&self) -> Option<BulkAction> {
        self.pending_bulk
    }

    /// Ask for confirmation of a bulk action on the selection
    ///
    /// Returns false and raises a warning when nothing is selected.
    pub fn request_bulk(&mut self, action: BulkAction) -> bool {
        if self.selection.is_empty() {
            self.toasts.push(Toast::warning(format!(
                "Select at least one item to {}",
                action.verb()
            )));
            return false;
        }
        self.pending_bulk = Some(action);
        true
    }

    pub fn cancel_bulk(&mut self) {
        self.pending_bulk = None;
    }

    /// Confirm the pending bulk action; the confirmation closes either way
    pub fn confirm_bulk(&mut self) -> Option<Command> {
        let action = self.pending_bulk.take()?;
        if self.selection.is_empty() {
            return None;
        }

        Some(Command::Bulk {
            action,
            ids: self.selected_ids(),
        })
    }

    // Create / edit form

    pub fn form(&self) -> Option<&ItemForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ItemForm> {
        self.form.as_mut()
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(ItemForm::create());
    }

    /// Open the edit form for a loaded item; false when the id is not loaded
    pub fn open_edit_form(&mut self, id: &str) -> bool {
        match self.items.iter().find(|item| item.id == id) {
            Some(item) => {
                self.form = Some(ItemForm::edit(&item.id, &item.name));
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate the form and produce the create/update command
    ///
    /// Invalid input stores the error on the form and returns `None`.
    pub fn submit_form(&mut self) -> Option<Command> {
        let form = self.form.as_mut()?;
        if form.submitting {
            return None;
        }

        match validate_name(&form.name) {
            Ok(name) => {
                form.submitting = true;
                form.error = None;
                Some(match &form.mode {
                    FormMode::Create => Command::Create { name },
                    FormMode::Edit { id } => Command::UpdateName {
                        id: id.clone(),
                        name,
                    },
                })
            }
            Err(e) => {
                form.error = Some(e);
                None
            }
        }
    }

    // Delete

    pub fn delete(&self, id: &str) -> Command {
        Command::Delete { id: id.to_string() }
    }

    // Notifications

    /// Take the toasts raised since the last call
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    /// Fold an executed command's result into the state
    ///
    /// Returns a follow-up command when the list needs reloading.
    pub fn handle_outcome(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Fetched { request, result } => {
                self.apply_page(request, result);
                None
            }
            Outcome::BulkCompleted { action, result } => match result {
                Ok(count) => {
                    tracing::info!(count, "Bulk {} succeeded", action.verb());
                    self.selection.clear();
                    let toast = if count == 0 {
                        Toast::info(format!("No selected items needed to be {}", action.past_tense()))
                    } else {
                        Toast::success(format!(
                            "{} {} {}",
                            count,
                            plural(count),
                            action.past_tense()
                        ))
                    };
                    self.toasts.push(toast);
                    Some(self.reset())
                }
                Err(e) => {
                    tracing::warn!("Bulk {} failed: {}", action.verb(), e);
                    self.toasts
                        .push(Toast::error(format!("Could not {} items: {}", action.verb(), e)));
                    None
                }
            },
            Outcome::Created { result } => self.apply_save(result, "created"),
            Outcome::Renamed { result } => self.apply_save(result, "updated"),
            Outcome::Deleted { id, result } => match result {
                Ok(()) => {
                    self.selection.remove(&id);
                    self.toasts.push(Toast::success("Item deleted"));
                    Some(self.reset())
                }
                // Someone else removed it first; the list is stale
                Err(e) if e.is_not_found() => {
                    tracing::info!(item_id = %id, "Item was already deleted");
                    self.selection.remove(&id);
                    self.toasts.push(Toast::warning("Item was already deleted"));
                    Some(self.reset())
                }
                Err(e) => {
                    tracing::warn!(item_id = %id, "Delete failed: {}", e);
                    self.toasts
                        .push(Toast::error(format!("Could not delete item: {}", e)));
                    None
                }
            },
        }
    }

    fn apply_page(&mut self, request: FetchRequest, result: Result<Vec<Item>, ClientError>) {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                current = self.generation,
                "Dropping superseded page"
            );
            return;
        }

        match (request.mode, result) {
            (FetchMode::Reset, Ok(page)) => {
                self.has_more = page.len() as u64 == PAGE_SIZE;
                self.items = page;
                self.state = ListState::Idle;
            }
            (FetchMode::Append, Ok(page)) => {
                self.has_more = page.len() as u64 == PAGE_SIZE;
                self.items.extend(page);
                self.state = ListState::Idle;
            }
            (FetchMode::Reset, Err(e)) => {
                tracing::warn!("Loading items failed: {}", e);
                self.toasts
                    .push(Toast::error(format!("Could not load items: {}", e)));
                self.state = self.state_before_reset;
            }
            (FetchMode::Append, Err(e)) => {
                tracing::warn!("Loading more items failed: {}", e);
                self.toasts
                    .push(Toast::error(format!("Could not load more items: {}", e)));
                self.state = ListState::Idle;
            }
        }
    }

    fn apply_save(&mut self, result: Result<Item, ClientError>, verb: &str) -> Option<Command> {
        match result {
            Ok(item) => {
                tracing::info!(item_id = %item.id, "Item {}", verb);
                self.form = None;
                self.toasts
                    .push(Toast::success(format!("Item \"{}\" {}", item.name, verb)));
                Some(self.reset())
            }
            Err(e) => {
                tracing::warn!("Saving item failed: {}", e);
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                }
                self.toasts
                    .push(Toast::error(format!("Could not save item: {}", e)));
                None
            }
        }
    }
}
