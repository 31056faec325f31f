//! # Lamina Middleware
//!
//! Builds a single request handler out of an ordered list of middleware
//! layers and an optional terminal function.
//!
//! ## Execution Order
//!
//! Layers are entered in declaration order and unwound in reverse. With pre
//! functions `f0, f1`, post functions `p0, p1` and terminal `t`:
//!
//! ```text
//! [pre f0, pre f1, t]     → f0 f1 t
//! [post p0, post p1]      → p1 p0
//! [post p0, post p1, t]   → t p1 p0
//! ```
//!
//! ## Building Blocks
//!
//! | Type         | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | [`Layer`]    | `Option<next> -> handler`, the middleware shape      |
//! | [`PrePost`]  | Lifts a [`RequestFn`](lamina_core::RequestFn) into a pre or post layer |
//! | [`Chain`]    | Ordered layers plus terminal function, fluent mutators |
//! | [`Next`]     | Downstream callback for layers built with [`Layer::from_fn`] |
//!
//! ## Example
//!
//! ```
//! use lamina_core::{Handler, RequestFn, ResponseWriter, empty_request};
//! use lamina_middleware::{Chain, Layer};
//!
//! # tokio_test::block_on(async {
//! let h1 = Layer::from_fn(|writer, request, next| {
//!     Box::pin(async move {
//!         writer.write_str("h1");
//!         next.run(writer, request).await;
//!     })
//! });
//!
//! let mut chain = Chain::from_layers([h1]).expect("no absent layers");
//! let handler = chain
//!     .compose_with(RequestFn::from_sync(|writer, _| { writer.write_str("f1"); }))
//!     .expect("chain is not empty");
//!
//! let mut writer = ResponseWriter::new();
//! handler.serve(&mut writer, &empty_request("/")).await;
//! assert_eq!(writer.body(), b"h1f1");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lamina-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod chain;
mod compose;
pub mod error;
pub mod layer;

// Re-export main types at crate root
pub use adapter::{Placement, PrePost};
pub use chain::Chain;
pub use error::{ChainError, ChainResult};
pub use layer::{Layer, Next};
