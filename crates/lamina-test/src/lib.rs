//! # Lamina Test
//!
//! In-memory testing for Lamina handlers and composed chains.
//!
//! [`TestClient`] feeds requests straight into a handler through the same
//! [`lamina_server::dispatch`] path the real server uses, so tests observe
//! identical defaults (`404 Not Found` when there is no handler, `200 OK`
//! with an empty body when the handler writes nothing) without binding ports.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use http::StatusCode;
//! use lamina_core::{BoxedHandler, RequestFn};
//! use lamina_test::TestClient;
//!
//! # tokio_test::block_on(async {
//! let handler: BoxedHandler = Arc::new(RequestFn::from_sync(|writer, request| {
//!     writer.write_header(StatusCode::CREATED);
//!     writer.write_str(request.uri().path());
//! }));
//!
//! let response = TestClient::new(handler).post("/users").send().await;
//! response
//!     .assert_status(StatusCode::CREATED)
//!     .assert_body_eq("/users");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lamina-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::TestRequest;
pub use response::TestResponse;
