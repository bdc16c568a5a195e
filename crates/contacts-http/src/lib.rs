// # Contacts REST Client
//
// This crate provides the HTTP implementation of `ContactApi`.
//
// ## Behavior
//
// - One HTTP request per call, no retries (the user re-attempts manually)
// - Success is decided by status code, per operation:
//   list 200, create 200/201, update 200, delete 204
// - Any other status is a rejection carrying the body's `message`
// - Unreachable backend or a malformed success body is a transport failure
//   carrying the raw error text
// - No timeout unless one is configured
//
// ## API Reference
//
// - List:   GET    `/contacts`              → `{"contacts": [...]}`
// - Create: POST   `/create_contact`        → `{"message": "..."}`
// - Update: PATCH  `/update_contact/{id}`   → `{"message": "..."}`
// - Delete: DELETE `/delete_contact/{id}`   → empty body
//
// `{id}` is sent as a single percent-encoded path segment.

use async_trait::async_trait;
use contacts_core::config::ApiConfig;
use contacts_core::traits::{ContactApi, Created};
use contacts_core::{Contact, ContactDraft, ContactId, Error, Result};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Message reported when the backend confirms a create without one
const DEFAULT_CREATED_MESSAGE: &str = "Contact created";

/// Message reported when the backend confirms an update without one
const DEFAULT_UPDATED_MESSAGE: &str = "Successfully updated!";

/// List response: the backend wraps the array, older builds send it bare
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Wrapped { contacts: Vec<Contact> },
    Bare(Vec<Contact>),
}

impl ListBody {
    fn into_contacts(self) -> Vec<Contact> {
        match self {
            ListBody::Wrapped { contacts } => contacts,
            ListBody::Bare(contacts) => contacts,
        }
    }
}

/// Body of create/update confirmations
#[derive(Deserialize, Default)]
struct MessageBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    contact: Option<Contact>,
}

/// HTTP client for the contacts backend
#[derive(Debug, Clone)]
pub struct RestClient {
    /// Base URL without trailing slash
    base_url: String,

    /// Parsed base, used to build per-record paths
    base: Url,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl RestClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&ApiConfig::new(base_url))
    }

    /// Create a client from configuration
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)` if the configuration is invalid or the HTTP
    ///   client cannot be built
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            base,
            client,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/{endpoint}/{id}` with the id percent-encoded as one segment
    fn record_url(&self, endpoint: &str, id: &ContactId) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(endpoint)
            .push(id.as_str());
        Ok(url)
    }

    /// Send a request, mapping connection-level failures to `Error::Transport`
    async fn send(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            tracing::warn!("{} request failed: {}", operation, e);
            Error::transport(e.to_string())
        })
    }

    /// Turn a non-success response into a rejection
    async fn reject(&self, operation: &str, response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = failure_message(operation, status, &body);
        tracing::warn!("{} rejected with {}: {}", operation, status, message);
        Error::rejected(status.as_u16(), message)
    }

    /// Parse a success body, treating malformed JSON as a transport failure
    async fn parse<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        response: Response,
    ) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{} returned a malformed body: {}", operation, e);
            Error::transport(format!("Failed to parse {} response: {}", operation, e))
        })
    }

    /// Parse an optional confirmation body; empty bodies are accepted
    async fn parse_message(&self, operation: &str, response: Response) -> Result<MessageBody> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(MessageBody::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{} returned a malformed body: {}", operation, e);
            Error::transport(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

#[async_trait]
impl ContactApi for RestClient {
    /// ```http
    /// GET /contacts
    /// ```
    async fn list(&self) -> Result<Vec<Contact>> {
        tracing::debug!("GET {}/contacts", self.base_url);
        let response = self.send("list", self.client.get(self.url("/contacts"))).await?;

        if response.status() != StatusCode::OK {
            return Err(self.reject("list", response).await);
        }

        let body: ListBody = self.parse("list", response).await?;
        Ok(body.into_contacts())
    }

    /// ```http
    /// POST /create_contact
    /// {"firstName": "...", "lastName": "...", "email": "..."}
    /// ```
    async fn create(&self, draft: &ContactDraft) -> Result<Created> {
        tracing::debug!("POST {}/create_contact", self.base_url);
        let request = self.client.post(self.url("/create_contact")).json(draft);
        let response = self.send("create", request).await?;

        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(self.reject("create", response).await);
        }

        let body = self.parse_message("create", response).await?;
        Ok(Created {
            message: message_text(body.message).unwrap_or_else(|| DEFAULT_CREATED_MESSAGE.to_string()),
            contact: body.contact,
        })
    }

    /// ```http
    /// PATCH /update_contact/:id
    /// {"firstName": "...", "lastName": "...", "email": "..."}
    /// ```
    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> Result<String> {
        let url = self.record_url("update_contact", id)?;
        tracing::debug!("PATCH {}", url);
        let response = self.send("update", self.client.patch(url).json(draft)).await?;

        if response.status() != StatusCode::OK {
            return Err(self.reject("update", response).await);
        }

        let body = self.parse_message("update", response).await?;
        Ok(message_text(body.message).unwrap_or_else(|| DEFAULT_UPDATED_MESSAGE.to_string()))
    }

    /// ```http
    /// DELETE /delete_contact/:id
    /// ```
    async fn delete(&self, id: &ContactId) -> Result<()> {
        let url = self.record_url("delete_contact", id)?;
        tracing::debug!("DELETE {}", url);
        let response = self.send("delete", self.client.delete(url)).await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(self.reject("delete", response).await);
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Text of a `message` field: strings verbatim, other values as compact JSON
fn message_text(message: Option<Value>) -> Option<String> {
    match message? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Human-readable message for a rejected call
///
/// Prefers the JSON `message` field, then the raw body text, then a
/// generic description of the status.
fn failure_message(operation: &str, status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<MessageBody>(body).ok();
    let has_message = parsed.as_ref().is_some_and(|p| p.message.is_some());
    if let Some(text) = parsed.and_then(|p| message_text(p.message)) {
        return text;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !has_message {
        return trimmed.to_string();
    }

    format!("{} failed with status {}", operation, status.as_u16())
}
