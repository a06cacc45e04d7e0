//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo entry.
pub type TodoId = i64;

/// A single todo item as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoEntry {
    pub id: TodoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

/// Request payload for creating a new todo: a `TodoEntry` without its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodoEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl NewTodoEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            done: false,
        }
    }
}

impl TodoEntry {
    pub fn with_id(id: TodoId, fields: NewTodoEntry) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            done: fields.done,
        }
    }

    /// Everything except the identifier.
    pub fn fields(&self) -> NewTodoEntry {
        NewTodoEntry {
            title: self.title.clone(),
            description: self.description.clone(),
            done: self.done,
        }
    }
}
