//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate. Integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo item.
pub type TodoId = u64;

/// A single todo item as listed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial-update payload. Only `completed` is ever changed by this client;
/// the title is fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub completed: bool,
}
