//! Requests as values, so front-ends can run them off the UI thread.

use crate::api::BoardApi;
use crate::board::{Board, Effect};
use crate::error::ApiError;
use crate::models::{Entry, EntryId, HealthReport, NewEntry};

/// A backend request waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(NewEntry),
    Delete(EntryId),
    Health,
}

/// The resolved outcome of a [`Request`].
#[derive(Debug)]
pub enum Response {
    Entries(Result<Vec<Entry>, ApiError>),
    Created(Result<(), ApiError>),
    Deleted(EntryId, Result<(), ApiError>),
    Health(Result<HealthReport, ApiError>),
}

/// Run a request against the backend.
pub async fn execute<A: BoardApi>(api: &A, request: Request) -> Response {
    match request {
        Request::List => Response::Entries(api.list_entries().await),
        Request::Create(entry) => Response::Created(api.create_entry(&entry).await),
        Request::Delete(id) => {
            let result = api.delete_entry(&id).await;
            Response::Deleted(id, result)
        }
        Request::Health => Response::Health(api.health().await),
    }
}

impl Board {
    /// Apply any response to the board, returning the follow-up effects.
    pub fn apply(&mut self, response: Response) -> Vec<Effect> {
        match response {
            Response::Entries(result) => {
                self.apply_entries(result);
                Vec::new()
            }
            Response::Created(result) => self.apply_created(result),
            Response::Deleted(id, result) => self.apply_deleted(&id, result),
            Response::Health(result) => {
                self.apply_health(result);
                Vec::new()
            }
        }
    }
}
