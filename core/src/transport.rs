//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the seam between the deterministic client and real I/O.
//! `UreqTransport` disables ureq's status-code-as-error behavior so 4xx/5xx
//! responses come back as data and the client interprets them.

use std::fmt;

use tracing::debug;
use ureq::Agent;

use crate::client::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs exactly one HTTP round-trip per call.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking HTTP transport backed by a `ureq` agent.
///
/// With credentials enabled a single agent (and its cookie store) is shared
/// by every request; otherwise each request gets a fresh agent and no cookies
/// survive between calls.
#[derive(Clone)]
pub struct UreqTransport {
    shared: Option<Agent>,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("with_credentials", &self.shared.is_some())
            .finish()
    }
}

impl UreqTransport {
    pub fn new(with_credentials: bool) -> Self {
        Self {
            shared: with_credentials.then(new_agent),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.with_credentials)
    }

    fn agent(&self) -> Agent {
        match &self.shared {
            Some(agent) => agent.clone(),
            None => new_agent(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, url = %req.url, "sending request");
        let agent = self.agent();

        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&req.url), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(&req.url), &req.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(agent.post(&req.url), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(agent.put(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(agent.put(&req.url), &req.headers).send_empty(),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn new_agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_share_one_agent() {
        assert!(UreqTransport::new(true).shared.is_some());
        assert!(UreqTransport::new(false).shared.is_none());
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let req = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/api/todos"),
            headers: Vec::new(),
            body: None,
        };
        let err = UreqTransport::default().execute(req).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
