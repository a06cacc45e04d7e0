//! Blocking API client for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport` runs
//! the round-trip, and `TodoApi` ties the two together into the four
//! operations callers actually use: list, create, update, delete.
//!
//! # Design
//! - `TodoClient` is stateless; its `ClientConfig` is fixed at construction.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and unit tests need no server.
//! - Errors are never handled here, only reported (`ApiError`).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use client::{ClientConfig, TodoClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{NewTodoEntry, TodoEntry, TodoId};
