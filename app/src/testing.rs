//! In-memory stand-in for the todo service, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, NewTodoEntry, TodoEntry, Transport, DEFAULT_BASE_URL};

#[derive(Debug, Default)]
pub(crate) struct MemoryTransport {
    todos: RefCell<BTreeMap<i64, TodoEntry>>,
    next_id: Cell<i64>,
    requests: RefCell<Vec<HttpRequest>>,
    offline: Cell<bool>,
}

impl MemoryTransport {
    pub(crate) fn requests(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn methods(&self) -> Vec<HttpMethod> {
        self.requests.borrow().iter().map(|r| r.method).collect()
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Insert directly, bypassing the request log.
    pub(crate) fn seed(&self, title: &str) -> TodoEntry {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let todo = TodoEntry::with_id(id, NewTodoEntry::new(title));
        self.todos.borrow_mut().insert(id, todo.clone());
        todo
    }
}

fn reply(status: u16, body: String) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

impl Transport for MemoryTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(ApiError::Transport("connection refused".to_string()));
        }

        let tail = request.url.strip_prefix(DEFAULT_BASE_URL).unwrap_or_default();
        let id = tail.strip_prefix('/').and_then(|s| s.parse::<i64>().ok());
        let body = request.body.unwrap_or_default();
        let mut todos = self.todos.borrow_mut();

        match (request.method, id) {
            (HttpMethod::Get, None) => {
                let list: Vec<_> = todos.values().cloned().collect();
                reply(200, serde_json::to_string(&list).unwrap())
            }
            (HttpMethod::Post, None) => {
                let input: NewTodoEntry = serde_json::from_str(&body).unwrap();
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                let todo = TodoEntry::with_id(id, input);
                todos.insert(id, todo.clone());
                reply(201, serde_json::to_string(&todo).unwrap())
            }
            (HttpMethod::Put, Some(id)) => match todos.get_mut(&id) {
                Some(slot) => {
                    let input: NewTodoEntry = serde_json::from_str(&body).unwrap();
                    *slot = TodoEntry::with_id(id, input);
                    reply(200, serde_json::to_string(slot).unwrap())
                }
                None => reply(404, String::new()),
            },
            (HttpMethod::Delete, Some(id)) => match todos.remove(&id) {
                Some(_) => reply(204, String::new()),
                None => reply(404, String::new()),
            },
            _ => reply(405, String::new()),
        }
    }
}
