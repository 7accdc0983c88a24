use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use todo_core::TodoClient;
use todo_web::{AppState, Config, UreqTransport};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!(api_url = %config.api_url, "using todo API");

    let state = AppState::new(TodoClient::new(&config.api_url), Arc::new(UreqTransport::new()));

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    todo_web::run(listener, state).await?;

    info!("server stopped");
    Ok(())
}
