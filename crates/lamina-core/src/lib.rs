//! # Lamina Core
//!
//! Core types shared by every Lamina crate.
//!
//! This crate defines the shapes the rest of the workspace is built on:
//!
//! - [`Handler`] - Something invocable with a response sink and a request
//! - [`BoxedHandler`] - A shareable, type-erased handler
//! - [`RequestFn`] - A plain request function, usable directly as a handler
//! - [`ResponseWriter`] - The response sink handlers write into
//! - [`Request`] / [`Response`] - The HTTP message types

#![doc(html_root_url = "https://docs.rs/lamina-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod handler;
mod types;
mod writer;

pub use handler::{BoxFuture, BoxedHandler, Handler, RequestFn};
pub use types::{empty_request, Request, Response};
pub use writer::ResponseWriter;
