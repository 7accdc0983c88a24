use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use todo_core::{DispatchError, TodoItem};

use crate::view::render_page;

/// A rejected form submission, together with the freshly reloaded
/// collection the error page is rendered over.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ActionError {
    #[source]
    pub error: DispatchError,
    pub todos: Vec<TodoItem>,
}

impl ActionError {
    pub fn status(&self) -> StatusCode {
        match self.error {
            DispatchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DispatchError::RemoteOperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short text shown to the user in the error banner.
    pub fn message(&self) -> String {
        match &self.error {
            DispatchError::InvalidInput(reason) => format!("Invalid input: {reason}"),
            DispatchError::RemoteOperationFailed { kind, .. } => format!("Failed to {kind} todo"),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let page = render_page(&self.todos, Some(&self.message()));
        (self.status(), Html(page)).into_response()
    }
}
