//! HTTP access to the guestbook backend.

use crate::error::ApiError;
use crate::models::{Entry, EntryId, HealthReport, NewEntry, Schema};
use std::future::Future;
use url::Url;

/// Operations the backend exposes.
///
/// Implemented over HTTP by [`HttpBoardApi`]; tests substitute in-memory fakes.
pub trait BoardApi: Send + Sync {
    /// Layout of the backend behind this API.
    fn schema(&self) -> Schema;

    /// Fetch the full entry list.
    fn list_entries(&self) -> impl Future<Output = Result<Vec<Entry>, ApiError>> + Send;

    /// Create an entry. The response body is ignored.
    fn create_entry(&self, entry: &NewEntry) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete an entry by id.
    fn delete_entry(&self, id: &EntryId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Query the health endpoint.
    fn health(&self) -> impl Future<Output = Result<HealthReport, ApiError>> + Send;
}

/// [`BoardApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: reqwest::Client,
    base: Url,
    schema: Schema,
}

impl HttpBoardApi {
    /// Create a client for the backend rooted at `base_url`.
    pub fn new(base_url: &str, schema: Schema) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url, schema)
    }

    /// Like [`HttpBoardApi::new`] with a preconfigured reqwest client.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        schema: Schema,
    ) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http or https URL".to_string()));
        }

        // Endpoints are joined relative to the base, so it has to look like a directory
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            schema,
        })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }

    /// List/create endpoint.
    pub fn collection_url(&self) -> Result<Url, ApiError> {
        match self.schema {
            Schema::Guestbook => self.endpoint("entries"),
            Schema::Board => self.endpoint("api/data"),
        }
    }

    /// Delete endpoint for a single entry.
    pub fn item_url(&self, id: &EntryId) -> Result<Url, ApiError> {
        if !self.schema.supports_delete() {
            return Err(self.unsupported("delete"));
        }

        let mut url = self.endpoint("api/data/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    pub fn health_url(&self) -> Result<Url, ApiError> {
        if !self.schema.supports_health() {
            return Err(self.unsupported("health check"));
        }
        self.endpoint("api/health")
    }

    fn unsupported(&self, operation: &'static str) -> ApiError {
        ApiError::Unsupported {
            operation,
            schema: self.schema,
        }
    }
}

fn transport(url: &Url) -> impl FnOnce(reqwest::Error) -> ApiError + '_ {
    move |source| ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

fn decode(url: &Url) -> impl FnOnce(reqwest::Error) -> ApiError + '_ {
    move |source| ApiError::Decode {
        url: url.to_string(),
        source,
    }
}

fn ensure_success(url: &Url, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

impl BoardApi for HttpBoardApi {
    fn schema(&self) -> Schema {
        self.schema
    }

    fn list_entries(&self) -> impl Future<Output = Result<Vec<Entry>, ApiError>> + Send {
        async move {
            let url = self.collection_url()?;
            tracing::debug!("GET {}", url);

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(transport(&url))?;
            let response = ensure_success(&url, response)?;

            response.json::<Vec<Entry>>().await.map_err(decode(&url))
        }
    }

    fn create_entry(&self, entry: &NewEntry) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move {
            let url = self.collection_url()?;
            tracing::debug!("POST {}", url);

            let response = self
                .client
                .post(url.clone())
                .json(entry)
                .send()
                .await
                .map_err(transport(&url))?;
            ensure_success(&url, response)?;
            Ok(())
        }
    }

    fn delete_entry(&self, id: &EntryId) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move {
            let url = self.item_url(id)?;
            tracing::debug!("DELETE {}", url);

            let response = self
                .client
                .delete(url.clone())
                .send()
                .await
                .map_err(transport(&url))?;
            ensure_success(&url, response)?;
            Ok(())
        }
    }

    fn health(&self) -> impl Future<Output = Result<HealthReport, ApiError>> + Send {
        async move {
            let url = self.health_url()?;
            tracing::debug!("GET {}", url);

            // Any status is fine as long as the body carries a report
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(transport(&url))?;

            response.json::<HealthReport>().await.map_err(decode(&url))
        }
    }
}
