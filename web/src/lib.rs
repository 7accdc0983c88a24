//! Browser front end for a remote todo collection.
//!
//! # Overview
//! A single server-rendered page. `GET /` runs the collection loader and
//! renders whatever it returned. `POST /` parses the submitted form into an
//! intent, dispatches it, and redirects back to `/` so the page reloads.
//!
//! # Design
//! - The router is generic over `Transport`, so tests run it against a stub
//!   or a live mock backend without touching the handlers.
//! - No todo state is kept between requests; every render reloads.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use todo_core::{TodoClient, Transport};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod routes;
pub mod transport;
pub mod view;

pub use config::Config;
pub use transport::UreqTransport;

/// Shared handler state: the request builder and the transport that carries
/// its requests.
pub struct AppState<T> {
    pub(crate) client: TodoClient,
    pub(crate) transport: Arc<T>,
}

impl<T> AppState<T> {
    pub fn new(client: TodoClient, transport: Arc<T>) -> Self {
        Self { client, transport }
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

pub fn app<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(routes::index::<T>).post(routes::submit::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the front end on `listener` until Ctrl-C or SIGTERM.
pub async fn run<T: Transport + 'static>(listener: TcpListener, state: AppState<T>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
