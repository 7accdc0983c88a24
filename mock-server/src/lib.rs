//! In-memory stand-in for the todo REST backend.
//!
//! Serves the same surface as the real service under `/api`: a collection at
//! `/api/todos/` and items at `/api/todos/{id}/`, both with trailing slashes.
//! Ids are sequential from 1 and the collection lists newest first.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// PATCH payload: only the fields present are applied.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

impl Store {
    fn insert(&mut self, title: String, completed: bool) -> Todo {
        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            title,
            completed,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::default();
    let todos = Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}/",
            get(get_todo)
                .put(replace_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
        .with_state(db);
    Router::new().nest("/api", todos)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().rev().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if input.title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let todo = db.write().await.insert(input.title, input.completed);
    debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    if input.title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.completed = input.completed;
    Ok(Json(todo.clone()))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        if title.is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.todos.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
