//! HTTP server configuration.
//!
//! - `LISTEN_ADDR`: socket address to bind (default: `0.0.0.0:8091`)
//! - `LISTEN_PORT`: legacy form, either `:8091` or `8091`, used when `LISTEN_ADDR` is unset
//! - `SHUTDOWN_GRACE_SECS`: how long in-flight requests may run after a shutdown
//!   signal (default: `5`)

use std::time::Duration;

use crate::env::parse_or;

const DEFAULT_PORT: &str = "8091";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| {
            let port = std::env::var("LISTEN_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
            listen_addr_from_port(&port)
        });

        Self {
            listen_addr,
            shutdown_grace: Duration::from_secs(parse_or("SHUTDOWN_GRACE_SECS", 5)),
        }
    }
}

fn listen_addr_from_port(port: &str) -> String {
    format!("0.0.0.0:{}", port.trim().trim_start_matches(':'))
}
