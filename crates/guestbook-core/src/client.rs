//! The guestbook page as a sequential client.
//!
//! [`GuestbookClient`] drives a [`Board`] against a [`BoardApi`], awaiting
//! each request before applying it, and reports to the user through a
//! [`Notifier`].

use crate::api::BoardApi;
use crate::board::{Board, Effect};
use crate::error::ValidationError;
use crate::models::{EntryId, FormState};

/// Blocking user interaction: alerts and yes/no confirmations.
pub trait Notifier {
    /// Show a message and wait for the user to acknowledge it.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// How a [`GuestbookClient::delete_entry`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing was sent: the user declined or the schema has no delete.
    Cancelled,
    Deleted,
    /// The request was sent and did not succeed.
    Failed,
}

/// Board state plus the backend it is loaded from.
pub struct GuestbookClient<A, N> {
    api: A,
    notifier: N,
    board: Board,
}

impl<A: BoardApi, N: Notifier> GuestbookClient<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        let board = Board::new(api.schema());
        Self {
            api,
            notifier,
            board,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pending input fields.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.board.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Initial page load: backend status (when available), then the list.
    pub async fn load(&mut self) {
        if self.board.schema().supports_health() {
            self.fetch_backend_health().await;
        }
        self.fetch_entries().await;
    }

    /// Replace the list with the backend's current one.
    pub async fn fetch_entries(&mut self) {
        self.board.begin_fetch();
        let result = self.api.list_entries().await;
        self.board.apply_entries(result);
    }

    /// Submit the form.
    ///
    /// Invalid input is alerted and nothing is sent.
    pub async fn submit_entry(&mut self) -> Result<(), ValidationError> {
        let payload = match self.board.prepare_submission() {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier.alert(&e.to_string());
                return Err(e);
            }
        };

        let result = self.api.create_entry(&payload).await;
        let effects = self.board.apply_created(result);
        self.run_effects(effects).await;
        Ok(())
    }

    /// Delete an entry after asking the user.
    pub async fn delete_entry(&mut self, id: &EntryId) -> DeleteOutcome {
        if !self.board.schema().supports_delete() {
            tracing::warn!("Delete is not available with the {} schema", self.board.schema());
            return DeleteOutcome::Cancelled;
        }

        if !self.notifier.confirm(&Board::delete_prompt(id)) {
            tracing::debug!("Delete of {} cancelled", id);
            return DeleteOutcome::Cancelled;
        }

        let result = self.api.delete_entry(id).await;
        let outcome = if result.is_ok() {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Failed
        };
        let effects = self.board.apply_deleted(id, result);
        self.run_effects(effects).await;
        outcome
    }

    /// Refresh the backend status line.
    pub async fn fetch_backend_health(&mut self) {
        let result = self.api.health().await;
        self.board.apply_health(result);
    }

    async fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Alert(message) => self.notifier.alert(&message),
                Effect::Refresh => self.fetch_entries().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DELETED_MESSAGE, DELETE_FAILED_MESSAGE};
    use crate::error::ApiError;
    use crate::models::{BackendStatus, Entry, HealthReport, NewEntry, Schema};
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(NewEntry),
        Delete(EntryId),
        Health,
    }

    /// Backend fake that records every call.
    struct FakeApi {
        schema: Schema,
        calls: Mutex<Vec<Call>>,
        entries: Mutex<Vec<Entry>>,
        delete_status: u16,
        health_message: Option<serde_json::Value>,
        health_fails: bool,
    }

    impl FakeApi {
        fn new(schema: Schema) -> Self {
            Self {
                schema,
                calls: Mutex::new(Vec::new()),
                entries: Mutex::new(Vec::new()),
                delete_status: 204,
                health_message: Some("backend-a".into()),
                health_fails: false,
            }
        }

        fn with_entries(self, entries: Vec<Entry>) -> Self {
            *self.entries.lock().unwrap() = entries;
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn error(status: u16) -> ApiError {
            ApiError::Status {
                url: "http://fake/".to_string(),
                status,
            }
        }
    }

    impl BoardApi for FakeApi {
        fn schema(&self) -> Schema {
            self.schema
        }

        fn list_entries(&self) -> impl Future<Output = Result<Vec<Entry>, ApiError>> + Send {
            self.record(Call::List);
            let entries = self.entries.lock().unwrap().clone();
            async move { Ok(entries) }
        }

        fn create_entry(&self, entry: &NewEntry) -> impl Future<Output = Result<(), ApiError>> + Send {
            self.record(Call::Create(entry.clone()));
            async { Ok(()) }
        }

        fn delete_entry(&self, id: &EntryId) -> impl Future<Output = Result<(), ApiError>> + Send {
            self.record(Call::Delete(id.clone()));
            let status = self.delete_status;
            async move {
                if (200..300).contains(&status) {
                    Ok(())
                } else {
                    Err(FakeApi::error(status))
                }
            }
        }

        fn health(&self) -> impl Future<Output = Result<HealthReport, ApiError>> + Send {
            self.record(Call::Health);
            let result = if self.health_fails {
                Err(FakeApi::error(502))
            } else {
                Ok(HealthReport {
                    message: self.health_message.clone(),
                })
            };
            async move { result }
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        alerts: Vec<String>,
        questions: Vec<String>,
        answer: bool,
    }

    impl Notifier for FakeNotifier {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.questions.push(message.to_string());
            self.answer
        }
    }

    fn entry(id: i64, content: &str) -> Entry {
        Entry {
            id: EntryId::Number(id),
            author: None,
            content: content.to_string(),
            created_at: "2024-05-01T10:00:00+00:00".to_string(),
        }
    }

    fn confirming(answer: bool) -> FakeNotifier {
        FakeNotifier {
            answer,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_content_never_hits_the_network() {
        let mut client = GuestbookClient::new(FakeApi::new(Schema::Board), FakeNotifier::default());

        let result = client.submit_entry().await;

        assert_eq!(result, Err(ValidationError::MissingContent));
        assert!(client.api().calls().is_empty());
        assert_eq!(client.notifier().alerts, vec!["Please enter some content."]);
    }

    #[tokio::test]
    async fn guestbook_requires_author_before_sending() {
        let mut client =
            GuestbookClient::new(FakeApi::new(Schema::Guestbook), FakeNotifier::default());
        client.form_mut().content = "hello".into();

        assert!(client.submit_entry().await.is_err());
        assert!(client.api().calls().is_empty());
        assert_eq!(client.board().form.content, "hello");
    }

    #[tokio::test]
    async fn submit_clears_form_and_refreshes_once() {
        let api = FakeApi::new(Schema::Guestbook).with_entries(vec![entry(1, "hello")]);
        let mut client = GuestbookClient::new(api, FakeNotifier::default());
        client.form_mut().author = "kim".into();
        client.form_mut().content = "hello".into();

        client.submit_entry().await.unwrap();

        assert_eq!(
            client.api().calls(),
            vec![
                Call::Create(NewEntry {
                    author: Some("kim".into()),
                    content: "hello".into(),
                }),
                Call::List,
            ]
        );
        assert_eq!(client.board().form, FormState::default());
        assert_eq!(client.board().entries().len(), 1);
    }

    #[tokio::test]
    async fn fetched_list_is_shown() {
        let api = FakeApi::new(Schema::Board).with_entries(vec![entry(1, "hi")]);
        let mut client = GuestbookClient::new(api, FakeNotifier::default());

        client.fetch_entries().await;

        let entries = client.board().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "hi");
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = FakeApi::new(Schema::Board).with_entries(vec![entry(1, "hi")]);
        let mut client = GuestbookClient::new(api, confirming(false));
        client.fetch_entries().await;

        let outcome = client.delete_entry(&EntryId::Number(1)).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(client.api().calls(), vec![Call::List]);
        assert_eq!(client.board().entries().len(), 1);
        assert_eq!(client.notifier().questions.len(), 1);
        assert!(client.notifier().alerts.is_empty());
    }

    #[tokio::test]
    async fn rejected_delete_alerts_and_keeps_list() {
        let mut api = FakeApi::new(Schema::Board).with_entries(vec![entry(1, "hi")]);
        api.delete_status = 500;
        let mut client = GuestbookClient::new(api, confirming(true));
        client.fetch_entries().await;

        let outcome = client.delete_entry(&EntryId::Number(1)).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(
            client.api().calls(),
            vec![Call::List, Call::Delete(EntryId::Number(1))]
        );
        assert_eq!(client.notifier().alerts, vec![DELETE_FAILED_MESSAGE]);
        assert_eq!(client.board().entries().len(), 1);
    }

    #[tokio::test]
    async fn accepted_delete_confirms_and_refreshes() {
        let api = FakeApi::new(Schema::Board).with_entries(vec![entry(1, "hi")]);
        let mut client = GuestbookClient::new(api, confirming(true));

        let outcome = client.delete_entry(&EntryId::Number(1)).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(
            client.api().calls(),
            vec![Call::Delete(EntryId::Number(1)), Call::List]
        );
        assert_eq!(client.notifier().alerts, vec![DELETED_MESSAGE]);
    }

    #[tokio::test]
    async fn guestbook_delete_is_ignored() {
        let mut client = GuestbookClient::new(FakeApi::new(Schema::Guestbook), confirming(true));

        let outcome = client.delete_entry(&EntryId::Number(1)).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(client.api().calls().is_empty());
        assert!(client.notifier().questions.is_empty());
    }

    #[tokio::test]
    async fn failed_health_check_overrides_previous_status() {
        let mut client = GuestbookClient::new(FakeApi::new(Schema::Board), FakeNotifier::default());
        client.fetch_backend_health().await;
        assert_eq!(
            client.board().backend_status(),
            &BackendStatus::Reported("backend-a".into())
        );

        client.api.health_fails = true;
        client.fetch_backend_health().await;

        assert_eq!(client.board().backend_status().to_string(), "connection failed");
    }

    #[tokio::test]
    async fn numeric_health_message_is_shown() {
        let mut api = FakeApi::new(Schema::Board);
        api.health_message = Some(42.into());
        let mut client = GuestbookClient::new(api, FakeNotifier::default());

        client.fetch_backend_health().await;

        assert_eq!(client.board().backend_status().to_string(), "42");
    }

    #[tokio::test]
    async fn load_checks_health_then_lists() {
        let mut client = GuestbookClient::new(FakeApi::new(Schema::Board), FakeNotifier::default());
        client.load().await;
        assert_eq!(client.api().calls(), vec![Call::Health, Call::List]);

        let mut client =
            GuestbookClient::new(FakeApi::new(Schema::Guestbook), FakeNotifier::default());
        client.load().await;
        assert_eq!(client.api().calls(), vec![Call::List]);
    }
}
