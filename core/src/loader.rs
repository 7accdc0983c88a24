//! Collection loader: fetch the whole todo collection for a page view.
//!
//! # Design
//! `fetch_todos` is the strict operation and returns every failure.
//! `load` applies [`FailSoft::or_empty`] on top, so the page always has
//! something to render. An unreachable backend and an empty collection look
//! the same to the user; the difference only shows up in the logs.

use std::fmt::Display;

use tracing::warn;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::TodoItem;

/// Replace a failed result with the type's default value, logging the error.
pub trait FailSoft<T> {
    fn or_empty(self, context: &str) -> T;
}

impl<T: Default, E: Display> FailSoft<T> for Result<T, E> {
    fn or_empty(self, context: &str) -> T {
        self.unwrap_or_else(|error| {
            warn!(%error, "{context}; falling back to an empty value");
            T::default()
        })
    }
}

impl TodoClient {
    /// Issue one `GET /todos/` and return the items in server order.
    pub async fn fetch_todos<T: Transport>(&self, transport: &T) -> Result<Vec<TodoItem>, ApiError> {
        let response = transport.execute(self.build_list_todos()).await?;
        self.parse_list_todos(response)
    }

    /// Fail-soft variant of [`TodoClient::fetch_todos`]: never errors, yields
    /// an empty list when the backend is unreachable or misbehaves.
    pub async fn load<T: Transport>(&self, transport: &T) -> Vec<TodoItem> {
        self.fetch_todos(transport)
            .await
            .or_empty("failed to fetch todos")
    }
}
