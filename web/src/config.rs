use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Runtime settings. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-web", about = "Browser front end for a remote todo collection")]
pub struct Config {
    /// Address to bind the web server to.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind the web server to.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL of the todo API; `/todos/` is appended to it.
    #[arg(long = "api-url", env = "TODO_API_URL", default_value = "http://127.0.0.1:8000/api")]
    pub api_url: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
