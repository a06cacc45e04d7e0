//! Application bootstrap: create the app, install plugins, mount it.
//!
//! # Design
//! Startup is one linear sequence run once per process:
//! `App::create(root) -> use_plugin(QueryPlugin) -> mount(host, selector)`.
//! Mounting hands back a `MountedApp`, which is what commands run against.
//! Nothing here retries or recovers; every failure goes to the caller.

use std::io::Write;

use thiserror::Error;
use todo_core::{ApiError, NewTodoEntry, TodoApi, TodoEntry, TodoId, Transport};
use tracing::{debug, info};

use crate::config::{AppConfig, DEFAULT_MOUNT};
use crate::query::QueryClient;
use crate::view::TodoView;

/// Cache key of the todo list.
pub const TODOS_KEY: &str = "todos";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("mount point {0:?} not found in host")]
    MountPointMissing(String),

    #[error("no query client installed; register QueryPlugin before mounting")]
    QueryClientMissing,

    #[error("todo {0} not found")]
    TodoNotFound(TodoId),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to render: {0}")]
    Render(#[from] std::io::Error),
}

/// Something that can be registered on an `App` before it is mounted.
pub trait Plugin {
    fn name(&self) -> &'static str;

    fn install<T: Transport>(self, app: &mut App<T>);
}

/// Installs the data-fetching cache.
#[derive(Debug, Clone, Default)]
pub struct QueryPlugin {
    client: Option<QueryClient<Vec<TodoEntry>>>,
}

impl QueryPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: QueryClient<Vec<TodoEntry>>) -> Self {
        Self {
            client: Some(client),
        }
    }
}

impl Plugin for QueryPlugin {
    fn name(&self) -> &'static str {
        "query"
    }

    fn install<T: Transport>(self, app: &mut App<T>) {
        app.query_client = Some(self.client.unwrap_or_default());
    }
}

/// A terminal exposing named mount points. Each point can be claimed once.
#[derive(Debug)]
pub struct TerminalHost<W> {
    selector: String,
    target: Option<W>,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(target: W) -> Self {
        Self::with_selector(DEFAULT_MOUNT, target)
    }

    pub fn with_selector(selector: &str, target: W) -> Self {
        Self {
            selector: selector.to_string(),
            target: Some(target),
        }
    }

    fn claim(&mut self, selector: &str) -> Option<W> {
        if self.selector != selector {
            return None;
        }
        self.target.take()
    }
}

/// Application instance before mounting.
#[derive(Debug)]
pub struct App<T> {
    root: TodoView<T>,
    query_client: Option<QueryClient<Vec<TodoEntry>>>,
    plugins: Vec<&'static str>,
}

impl<T: Transport> App<T> {
    pub fn create(root: TodoView<T>) -> Self {
        Self {
            root,
            query_client: None,
            plugins: Vec::new(),
        }
    }

    pub fn use_plugin<P: Plugin>(mut self, plugin: P) -> Self {
        let name = plugin.name();
        plugin.install(&mut self);
        debug!(plugin = name, "plugin installed");
        self.plugins.push(name);
        self
    }

    pub fn mount<W: Write>(
        self,
        host: &mut TerminalHost<W>,
        selector: &str,
    ) -> Result<MountedApp<T, W>, AppError> {
        let queries = self.query_client.ok_or(AppError::QueryClientMissing)?;
        let out = host
            .claim(selector)
            .ok_or_else(|| AppError::MountPointMissing(selector.to_string()))?;
        info!(selector, plugins = ?self.plugins, "app mounted");
        Ok(MountedApp {
            view: self.root,
            queries,
            out,
        })
    }
}

/// Create, configure and mount the app in one go.
pub fn bootstrap<T: Transport, W: Write>(
    api: TodoApi<T>,
    config: &AppConfig,
    host: &mut TerminalHost<W>,
) -> Result<MountedApp<T, W>, AppError> {
    App::create(TodoView::new(api))
        .use_plugin(QueryPlugin::with_client(QueryClient::new(config.stale_time())))
        .mount(host, &config.mount)
}

/// A mounted application: the root view, its query cache and the output it
/// renders into.
#[derive(Debug)]
pub struct MountedApp<T, W> {
    view: TodoView<T>,
    queries: QueryClient<Vec<TodoEntry>>,
    out: W,
}

impl<T: Transport, W: Write> MountedApp<T, W> {
    pub fn into_target(self) -> W {
        self.out
    }

    pub fn todos(&mut self) -> Result<Vec<TodoEntry>, AppError> {
        let api = self.view.api();
        Ok(self.queries.fetch_query(TODOS_KEY, || api.list())?)
    }

    /// Render the current list into the mount point.
    pub fn render(&mut self) -> Result<(), AppError> {
        let todos = self.todos()?;
        self.view.render(&todos, &mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Drop the cached list and render a fresh one.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        self.queries.invalidate(TODOS_KEY);
        self.render()
    }

    pub fn add(&mut self, todo: &NewTodoEntry) -> Result<TodoEntry, AppError> {
        let created = self.view.api().create(todo)?;
        self.queries.invalidate(TODOS_KEY);
        Ok(created)
    }

    pub fn set_done(&mut self, id: TodoId, done: bool) -> Result<TodoEntry, AppError> {
        let entry = self.entry(id)?;
        self.save(&TodoEntry { done, ..entry })
    }

    pub fn edit(
        &mut self,
        id: TodoId,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<TodoEntry, AppError> {
        let mut entry = self.entry(id)?;
        if let Some(title) = title {
            entry.title = title;
        }
        if let Some(description) = description {
            entry.description = Some(description).filter(|d| !d.is_empty());
        }
        self.save(&entry)
    }

    pub fn remove(&mut self, id: TodoId) -> Result<(), AppError> {
        self.view.api().delete(id)?;
        self.queries.invalidate(TODOS_KEY);
        Ok(())
    }

    fn save(&mut self, entry: &TodoEntry) -> Result<TodoEntry, AppError> {
        let updated = self.view.api().update(entry)?;
        self.queries.invalidate(TODOS_KEY);
        Ok(updated)
    }

    /// Look the entry up in the cached snapshot, refetching once on a miss.
    fn entry(&mut self, id: TodoId) -> Result<TodoEntry, AppError> {
        let cached = self
            .queries
            .get_query_data(TODOS_KEY)
            .and_then(|todos| todos.iter().find(|t| t.id == id))
            .cloned();
        if let Some(entry) = cached {
            return Ok(entry);
        }

        self.queries.invalidate(TODOS_KEY);
        self.todos()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(AppError::TodoNotFound(id))
    }
}
