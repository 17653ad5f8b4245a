//! In-memory view state of the page.
//!
//! The board owns the entry list, the pending form fields and the backend
//! status. It never talks to the network itself: front-ends perform the
//! requests and feed the outcomes back through the `apply_*` methods, which
//! return the [`Effect`]s the front-end has to carry out next.

use crate::error::{ApiError, ValidationError};
use crate::models::{BackendStatus, Entry, EntryId, FormState, HealthReport, NewEntry, Schema};

/// Progress of the most recent list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the previous list is still shown.
    Failed(String),
}

/// Follow-up work requested by an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-fetch the entry list.
    Refresh,
    /// Show a blocking message to the user.
    Alert(String),
}

/// Message shown after a successful delete.
pub const DELETED_MESSAGE: &str = "Deleted.";
/// Message shown when the backend rejects a delete.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete the entry.";

/// Entry list, form and backend status for one page.
#[derive(Debug, Clone)]
pub struct Board {
    schema: Schema,
    entries: Vec<Entry>,
    /// Pending input fields.
    pub form: FormState,
    backend_status: BackendStatus,
    load_state: LoadState,
}

impl Board {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            entries: Vec::new(),
            form: FormState::default(),
            backend_status: BackendStatus::Checking,
            load_state: LoadState::Idle,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Entries in backend order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn backend_status(&self) -> &BackendStatus {
        &self.backend_status
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Mark a list fetch as started.
    pub fn begin_fetch(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Apply the outcome of a list fetch.
    ///
    /// A successful response replaces the list wholesale. A failure is logged
    /// and the previous list stays visible.
    pub fn apply_entries(&mut self, result: Result<Vec<Entry>, ApiError>) {
        match result {
            Ok(entries) => {
                tracing::info!("Fetched {} entries", entries.len());
                self.entries = entries;
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!("Error fetching entries: {}", e);
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Validate the form and build the request payload.
    ///
    /// Content is always required; the guestbook layout also requires an
    /// author. No request may be sent when this fails.
    pub fn prepare_submission(&self) -> Result<NewEntry, ValidationError> {
        if self.schema.requires_author() {
            if self.form.author.is_empty() || self.form.content.is_empty() {
                return Err(ValidationError::MissingAuthorOrContent);
            }
            Ok(NewEntry {
                author: Some(self.form.author.clone()),
                content: self.form.content.clone(),
            })
        } else {
            if self.form.content.is_empty() {
                return Err(ValidationError::MissingContent);
            }
            Ok(NewEntry {
                author: None,
                content: self.form.content.clone(),
            })
        }
    }

    /// Apply the outcome of a create request.
    ///
    /// Once the backend has answered, whatever the status, the form is
    /// cleared and the list refreshed. When no response arrived at all the
    /// error is logged and the form is kept.
    pub fn apply_created(&mut self, result: Result<(), ApiError>) -> Vec<Effect> {
        match result {
            Ok(()) => {}
            Err(e) if e.got_response() => {
                tracing::warn!("Backend rejected new entry: {}", e);
            }
            Err(e) => {
                tracing::error!("Error creating entry: {}", e);
                return Vec::new();
            }
        }

        self.form.clear();
        vec![Effect::Refresh]
    }

    /// Confirmation question asked before deleting `id`.
    pub fn delete_prompt(id: &EntryId) -> String {
        format!("Really delete this entry? (ID: {id})")
    }

    /// Apply the outcome of a delete request.
    ///
    /// The list is never patched locally; a successful delete only schedules
    /// a refresh.
    pub fn apply_deleted(&mut self, id: &EntryId, result: Result<(), ApiError>) -> Vec<Effect> {
        match result {
            Ok(()) => {
                tracing::info!("Deleted entry {}", id);
                vec![Effect::Alert(DELETED_MESSAGE.to_string()), Effect::Refresh]
            }
            Err(e @ ApiError::Status { .. }) => {
                tracing::error!("Error deleting entry {}: {}", id, e);
                vec![Effect::Alert(DELETE_FAILED_MESSAGE.to_string())]
            }
            Err(e) => {
                tracing::error!("Error deleting entry {}: {}", id, e);
                vec![Effect::Alert(e.to_string())]
            }
        }
    }

    /// Apply the outcome of a health check.
    pub fn apply_health(&mut self, result: Result<HealthReport, ApiError>) {
        self.backend_status = match result {
            Ok(report) => match report.display_message() {
                Some(message) => BackendStatus::Reported(message),
                None => BackendStatus::Unknown,
            },
            Err(e) => {
                tracing::error!("Error fetching backend status: {}", e);
                BackendStatus::ConnectionFailed
            }
        };
    }
}
