//! Application state management.

use guestbook_core::{Board, Effect, Entry, EntryId, Request, Response, Schema};
use std::collections::VecDeque;

/// Application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Running,
    /// Application should quit.
    Quit,
}

/// Input mode for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// List navigation.
    Normal,
    /// Typing into the form.
    Editing,
}

/// Form field receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Author,
    Content,
}

/// A blocking dialog on top of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Message the user has to dismiss.
    Alert(String),
    /// Yes/no question guarding a delete.
    ConfirmDelete { message: String, id: EntryId },
}

/// Main application model.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Field being edited.
    pub field: Field,
    /// Entries, form and backend status.
    pub board: Board,
    /// Backend URL, shown in the header.
    pub api_url: String,
    /// Index of the highlighted entry.
    pub selected_index: usize,
    /// Open dialogs, front is shown.
    pub modals: VecDeque<Modal>,
    /// Requests dispatched but not yet answered.
    pub in_flight: usize,
    outbox: Vec<Request>,
}

impl App {
    /// Create a new application instance.
    pub fn new(schema: Schema, api_url: String) -> Self {
        let field = if schema.requires_author() {
            Field::Author
        } else {
            Field::Content
        };

        Self {
            state: AppState::Running,
            input_mode: InputMode::Normal,
            field,
            board: Board::new(schema),
            api_url,
            selected_index: 0,
            modals: VecDeque::new(),
            in_flight: 0,
            outbox: Vec::new(),
        }
    }

    /// Queue the requests made when the page opens.
    pub fn load(&mut self) {
        if self.board.schema().supports_health() {
            self.check_health();
        }
        self.refresh();
    }

    /// Queue a list fetch.
    pub fn refresh(&mut self) {
        self.board.begin_fetch();
        self.send(Request::List);
    }

    /// Queue a health check, if the backend has one.
    pub fn check_health(&mut self) {
        if self.board.schema().supports_health() {
            self.send(Request::Health);
        }
    }

    fn send(&mut self, request: Request) {
        self.in_flight += 1;
        self.outbox.push(request);
    }

    /// Requests queued since the last call, for the main loop to dispatch.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply a resolved request. Responses are applied in arrival order.
    pub fn handle_response(&mut self, response: Response) {
        self.in_flight = self.in_flight.saturating_sub(1);

        for effect in self.board.apply(response) {
            match effect {
                Effect::Alert(message) => self.alert(message),
                Effect::Refresh => self.refresh(),
            }
        }

        self.clamp_selection();
    }

    /// Open an alert dialog.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.modals.push_back(Modal::Alert(message.into()));
    }

    /// Dialog currently shown.
    pub fn active_modal(&self) -> Option<&Modal> {
        self.modals.front()
    }

    /// Close the alert on top.
    pub fn dismiss_alert(&mut self) {
        if matches!(self.modals.front(), Some(Modal::Alert(_))) {
            self.modals.pop_front();
        }
    }

    /// Validate and send the form.
    pub fn submit(&mut self) {
        match self.board.prepare_submission() {
            Ok(payload) => {
                tracing::info!("Submitting new entry");
                self.send(Request::Create(payload));
                self.input_mode = InputMode::Normal;
            }
            Err(e) => self.alert(e.to_string()),
        }
    }

    /// Ask whether to delete the highlighted entry.
    pub fn request_delete(&mut self) {
        if !self.board.schema().supports_delete() {
            return;
        }
        let Some(id) = self.selected_entry().map(|e| e.id.clone()) else {
            return;
        };

        self.modals.push_back(Modal::ConfirmDelete {
            message: Board::delete_prompt(&id),
            id,
        });
    }

    /// Answer the delete question on top.
    pub fn answer_delete(&mut self, accepted: bool) {
        if !matches!(self.modals.front(), Some(Modal::ConfirmDelete { .. })) {
            return;
        }
        if let Some(Modal::ConfirmDelete { id, .. }) = self.modals.pop_front() {
            if accepted {
                self.send(Request::Delete(id));
            } else {
                tracing::debug!("Delete of {} cancelled", id);
            }
        }
    }

    /// Highlighted entry.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.board.entries().get(self.selected_index)
    }

    /// Move selection up in the list.
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down in the list.
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.board.entries().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.board.entries().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Start typing into the form.
    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Switch between author and content (guestbook layout only).
    pub fn next_field(&mut self) {
        if !self.board.schema().requires_author() {
            return;
        }
        self.field = match self.field {
            Field::Author => Field::Content,
            Field::Content => Field::Author,
        };
    }

    fn field_mut(&mut self) -> &mut String {
        match self.field {
            Field::Author => &mut self.board.form.author,
            Field::Content => &mut self.board.form.content,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.field_mut().pop();
    }
}
