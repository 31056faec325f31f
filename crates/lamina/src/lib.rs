//! # Lamina
//!
//! Composable middleware chains for HTTP handlers.
//!
//! A [`Chain`](middleware::Chain) is an ordered list of
//! [`Layer`](middleware::Layer)s plus an optional terminal
//! [`RequestFn`](core::RequestFn). Plain request functions become layers
//! through the [`PrePost`](middleware::PrePost) adapter, which runs them before
//! or after the rest of the chain. Composing a chain yields one shareable
//! handler that can be served by [`Server`](server::Server) or driven in
//! tests.
//!
//! ## Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`core`] | `lamina-core` | `Handler`, `RequestFn`, `ResponseWriter` |
//! | [`middleware`] | `lamina-middleware` | `Chain`, `Layer`, `PrePost` |
//! | [`server`] | `lamina-server` | `Server`, `ServerConfig`, `dispatch` |
//! | [`telemetry`] | `lamina-telemetry` | `LogConfig`, `init_logging` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use lamina::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LogConfig::development())?;
//!
//!     let mut chain = Chain::new();
//!     chain
//!         .append_pre_fn(RequestFn::from_sync(|w, _| { w.write_str("auth;"); }))
//!         .append_post_fn(RequestFn::from_sync(|w, _| { w.write_str(";logged"); }));
//!
//!     let handler = chain.compose_with(RequestFn::from_sync(|w, _| {
//!         w.write_str("hello");
//!     }));
//!
//!     Server::builder()
//!         .config(ServerConfig::from_env("APP")?)
//!         .handler(handler)
//!         .build()
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/lamina/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use lamina_core as core;

// Re-export middleware types
pub use lamina_middleware as middleware;

// Re-export server types
pub use lamina_server as server;

// Re-export telemetry types
pub use lamina_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use lamina::prelude::*;
///
/// let mut chain = Chain::new();
/// chain.append_pre_fn(RequestFn::from_sync(|w, _| { w.write_str("a"); }));
/// assert_eq!(chain.len(), 1);
/// ```
pub mod prelude {
    pub use lamina_core::{BoxedHandler, Handler, Request, RequestFn, Response, ResponseWriter};

    pub use lamina_middleware::{Chain, ChainError, Layer, Next, Placement, PrePost};

    pub use lamina_server::{Server, ServerConfig, ShutdownSignal};

    pub use lamina_telemetry::{init_logging, LogConfig};
}
