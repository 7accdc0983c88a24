//! API client core for the todo front end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the two
//! operations a page needs:
//!
//! - [`TodoClient::load`]: fetch the whole collection, degrading to an empty
//!   list on any failure.
//! - [`TodoClient::dispatch`]: carry out one [`Intent`] with exactly one
//!   request, reporting `InvalidInput` or `RemoteOperationFailed`.
//!
//! # Design
//! - `TodoClient` is stateless and holds only `base_url`, so tests can point
//!   it at any fake backend.
//! - I/O goes through the [`Transport`] trait. The host supplies a real
//!   implementation; `StubTransport` (feature `test-util`)
//!   replays canned responses in tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod intent;
pub mod loader;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, DispatchError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
#[cfg(any(test, feature = "test-util"))]
pub use http::StubTransport;
pub use intent::{Intent, IntentKind};
pub use loader::FailSoft;
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
