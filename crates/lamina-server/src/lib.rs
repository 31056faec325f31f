//! # Lamina Server
//!
//! HTTP server hosting a composed Lamina handler.
//!
//! This crate provides:
//!
//! - [`Server`] - HTTP/1.1 accept loop over hyper and tokio
//! - [`ServerConfig`] - Bind address and timeouts, with environment overrides
//! - [`dispatch`] - Runs one request through a handler; shared with test clients
//! - [`ShutdownSignal`] / [`ConnectionTracker`] - Graceful shutdown
//!
//! A server with no handler answers every request with `404 Not Found`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lamina_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env("APP")?;
//!     Server::builder().config(config).build().run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/lamina-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dispatch;
mod error;
mod server;
mod shutdown;

pub use config::{
    ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
pub use dispatch::{dispatch, not_found, NOT_FOUND_BODY};
pub use error::{ConfigError, ServerError};
pub use server::{Server, ServerBuilder};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
