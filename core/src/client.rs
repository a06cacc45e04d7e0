//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodoEntry, TodoEntry, TodoId};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/todos";

const JSON: &str = "application/json";

/// Immutable client settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the todo collection; entries live at `<base_url>/<id>`.
    pub base_url: String,
    /// Carry cookies set by the server on subsequent requests.
    pub with_credentials: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            with_credentials: true,
        }
    }

    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TodoClient {
    config: ClientConfig,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self { config }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.config.base_url.clone(), None)
    }

    pub fn build_create(&self, input: &NewTodoEntry) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, self.config.base_url.clone(), Some(body)))
    }

    /// The full entry is sent; the server replaces the stored one.
    pub fn build_update(&self, entry: &TodoEntry) -> Result<HttpRequest, ApiError> {
        let body = encode(entry)?;
        Ok(self.request(HttpMethod::Put, self.entry_url(entry.id), Some(body)))
    }

    pub fn build_delete(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.entry_url(id), None)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoEntry>, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoEntry, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<TodoEntry, ApiError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(response).map(|_| ())
    }

    fn entry_url(&self, id: TodoId) -> String {
        format!("{}/{id}", self.config.base_url)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                ("content-type".to_string(), JSON.to_string()),
                ("accept".to_string(), JSON.to_string()),
            ],
            body,
        }
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Any 2xx passes; everything else is handed back with status and body intact.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body,
    })
}
