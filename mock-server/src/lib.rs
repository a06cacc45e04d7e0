//! In-memory todo service speaking the same wire contract as the real backend.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Deserialize)]
pub struct NewTodoEntry {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

/// Ids come from `next_id` and are never reused, even after a delete.
#[derive(Debug)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, TodoEntry>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            todos: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<TodoEntry>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodoEntry>,
) -> (StatusCode, Json<TodoEntry>) {
    let mut store = db.write().await;
    let todo = TodoEntry {
        id: store.next_id,
        title: input.title,
        description: input.description,
        done: input.done,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

/// Full replacement; the id in the path wins over the one in the body.
async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<NewTodoEntry>,
) -> Result<Json<TodoEntry>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *todo = TodoEntry {
        id,
        title: input.title,
        description: input.description,
        done: input.done,
    };
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
