//! Terminal application state and key handling

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{Block, Borders, TableState};
use tui_textarea::TextArea;

use catalog_client::{
    BulkAction, Command, ItemListController, Outcome, SearchDebouncer, ToastQueue,
};

/// Rows from the end of the list at which the next page is requested
const LOAD_MORE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
    Form,
    Confirm,
}

pub struct App {
    pub controller: ItemListController,
    pub table_state: TableState,
    pub search_input: TextArea<'static>,
    pub name_input: TextArea<'static>,
    pub focus: Focus,
    pub toasts: ToastQueue,
    pub show_help: bool,
    debouncer: SearchDebouncer,
    outbox: Vec<Command>,
}

fn single_line_input(title: &'static str, placeholder: &'static str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_block(Block::default().borders(Borders::ALL).title(title));
    input.set_placeholder_text(placeholder);
    input
}

fn first_line(input: &TextArea<'_>) -> String {
    input.lines().first().cloned().unwrap_or_default()
}

impl App {
    pub fn new() -> Self {
        let mut controller = ItemListController::new();
        let initial = controller.refresh();

        Self {
            controller,
            table_state: TableState::default(),
            search_input: single_line_input(" Search ", "type to filter by name"),
            name_input: single_line_input(" Name ", "3 to 100 characters"),
            focus: Focus::Table,
            toasts: ToastQueue::default(),
            show_help: false,
            debouncer: SearchDebouncer::default(),
            outbox: vec![initial],
        }
    }

    /// Commands waiting to be sent to the API
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    fn dispatch(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            self.outbox.push(command);
        }
    }

    pub fn handle_outcome(&mut self, outcome: Outcome) {
        let follow_up = self.controller.handle_outcome(outcome);
        self.dispatch(follow_up);

        if self.focus == Focus::Form && self.controller.form().is_none() {
            self.focus = Focus::Table;
        }
        self.clamp_cursor();
    }

    /// Advance timers: debounced search and toast expiry
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            let command = self.controller.set_search(term);
            if command.is_some() {
                self.table_state.select(Some(0));
            }
            self.dispatch(command);
        }

        self.toasts.push(self.controller.drain_toasts());
        self.toasts.tick(now);
    }

    /// Search text typed but not yet applied
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn selected_id(&self) -> Option<String> {
        let index = self.table_state.selected()?;
        self.controller.items().get(index).map(|item| item.id.clone())
    }

    fn clamp_cursor(&mut self) {
        let len = self.controller.items().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(index) if index >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.controller.items().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));

        if next + LOAD_MORE_THRESHOLD >= len {
            let command = self.controller.scrolled_near_bottom();
            self.dispatch(command);
        }
    }

    /// Handle a key press; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.focus {
            Focus::Table => return self.handle_table_key(key),
            Focus::Search => self.handle_search_key(key, now),
            Focus::Form => self.handle_form_key(key),
            Focus::Confirm => self.handle_confirm_key(key),
        }

        false
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            self.show_help = false;
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.controller.toggle_selection(&id);
                }
            }
            KeyCode::Char('a') => {
                if self.controller.all_loaded_selected() {
                    self.controller.clear_selection();
                } else {
                    self.controller.select_all();
                }
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('i') => {
                let command = self.controller.toggle_include_inactive();
                self.table_state.select(Some(0));
                self.dispatch(Some(command));
            }
            KeyCode::Char('r') => {
                let command = self.controller.refresh();
                self.dispatch(Some(command));
            }
            KeyCode::Char('n') => {
                self.controller.open_create_form();
                self.name_input = single_line_input(" Name ", "3 to 100 characters");
                self.focus = Focus::Form;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if self.controller.open_edit_form(&id) {
                        let name = self
                            .controller
                            .form()
                            .map(|form| form.name.clone())
                            .unwrap_or_default();
                        self.name_input = single_line_input(" Name ", "3 to 100 characters");
                        self.name_input.insert_str(name);
                        self.focus = Focus::Form;
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    let command = self.controller.delete(&id);
                    self.dispatch(Some(command));
                }
            }
            KeyCode::Char('D') => self.request_bulk(BulkAction::Deactivate),
            KeyCode::Char('A') => self.request_bulk(BulkAction::Activate),
            _ => {}
        }

        false
    }

    fn request_bulk(&mut self, action: BulkAction) {
        if self.controller.request_bulk(action) {
            self.focus = Focus::Confirm;
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.focus = Focus::Table;
            }
            _ => {
                if self.search_input.input(key) {
                    self.debouncer.input(first_line(&self.search_input), now);
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.controller.close_form();
                self.focus = Focus::Table;
            }
            KeyCode::Enter => {
                let command = self.controller.submit_form();
                self.dispatch(command);
            }
            _ => {
                if self.name_input.input(key) {
                    let name = first_line(&self.name_input);
                    if let Some(form) = self.controller.form_mut() {
                        form.set_name(name);
                    }
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let command = self.controller.confirm_bulk();
                self.dispatch(command);
                self.focus = Focus::Table;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.controller.cancel_bulk();
                self.focus = Focus::Table;
            }
            _ => {}
        }
    }
}
