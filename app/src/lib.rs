//! Terminal front end for the todo service.
//!
//! `bootstrap` wires a `TodoApi` into the root `TodoView`, installs the query
//! cache and mounts the result on a `TerminalHost`. The `todo` binary then
//! runs one command against the mounted app.

pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod query;
pub mod view;

#[cfg(test)]
mod testing;

pub use bootstrap::{bootstrap, App, AppError, MountedApp, Plugin, QueryPlugin, TerminalHost, TODOS_KEY};
pub use config::{load_config, AppConfig, DEFAULT_MOUNT};
pub use query::QueryClient;
pub use view::TodoView;
