//! One-call-per-operation facade over `TodoClient` and a `Transport`.

use crate::client::{ClientConfig, TodoClient};
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTodoEntry, TodoEntry, TodoId};

/// The four todo operations. Each issues exactly one request and returns the
/// decoded body, or the error unchanged.
#[derive(Debug, Clone)]
pub struct TodoApi<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl TodoApi<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::from_config(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> TodoApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: TodoClient::with_config(config),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list(&self) -> Result<Vec<TodoEntry>, ApiError> {
        let response = self.transport.execute(self.client.build_list())?;
        self.client.parse_list(response)
    }

    pub fn create(&self, todo: &NewTodoEntry) -> Result<TodoEntry, ApiError> {
        let response = self.transport.execute(self.client.build_create(todo)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, todo: &TodoEntry) -> Result<TodoEntry, ApiError> {
        let response = self.transport.execute(self.client.build_update(todo)?)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned responses and records every request.
    #[derive(Default)]
    struct Scripted {
        sent: RefCell<Vec<HttpRequest>>,
        replies: RefCell<Vec<Result<HttpResponse, ApiError>>>,
    }

    impl Scripted {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.replies.borrow_mut().remove(0)
        }
    }

    fn api(transport: Scripted) -> TodoApi<Scripted> {
        TodoApi::with_transport(ClientConfig::default(), transport)
    }

    #[test]
    fn create_issues_one_post() {
        let api = api(Scripted::default().reply(201, r#"{"id":1,"title":"Buy milk","done":false}"#));
        let created = api.create(&NewTodoEntry::new("Buy milk")).unwrap();
        assert_eq!(created.id, 1);
        let sent = api.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
    }

    #[test]
    fn delete_propagates_http_error() {
        let api = api(Scripted::default().reply(404, "no such todo"));
        let err = api.delete(99).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, ref body } if body == "no such todo"));
    }

    #[test]
    fn transport_error_passes_through() {
        let transport = Scripted::default();
        transport
            .replies
            .borrow_mut()
            .push(Err(ApiError::Transport("connection refused".to_string())));
        let err = api(transport).list().unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref msg) if msg == "connection refused"));
    }
}
