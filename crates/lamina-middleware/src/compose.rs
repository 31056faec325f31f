//! Folding a chain into a single handler.
//!
//! Composition reads the layers left to right, appends the terminal function
//! (if any) as an innermost pre layer, then folds from the tail inward:
//!
//! ```text
//! h = layers[m-1](None)
//! h = layers[m-2](h)
//! …
//! h = layers[0](h)
//! ```
//!
//! The chain itself is only read. Composing twice yields handlers with the
//! same behavior, and later mutations never reach a handler composed
//! earlier.
//!
//! # Example
//!
//! ```
//! use lamina_core::{Handler, RequestFn, ResponseWriter, empty_request};
//! use lamina_middleware::Chain;
//!
//! # tokio_test::block_on(async {
//! let f1 = RequestFn::from_sync(|writer, _| { writer.write_str("f1"); });
//! let f2 = RequestFn::from_sync(|writer, _| { writer.write_str("f2"); });
//! let f0 = RequestFn::from_sync(|writer, _| { writer.write_str("f0"); });
//!
//! let mut chain = Chain::new();
//! chain.append_post_fn(f1).append_post_fn(f2);
//! let handler = chain.compose_with(f0).expect("chain is not empty");
//!
//! let mut writer = ResponseWriter::new();
//! handler.serve(&mut writer, &empty_request("/")).await;
//! assert_eq!(writer.body(), b"f0f2f1");
//! # });
//! ```

use lamina_core::{BoxedHandler, RequestFn};

use crate::adapter::PrePost;
use crate::chain::Chain;
use crate::error::{ChainError, ChainResult};
use crate::layer::Layer;

impl Chain {
    /// Materializes the chain into one handler.
    ///
    /// Returns `None` when the chain has no layers and no terminal function.
    pub fn compose(&self) -> Option<BoxedHandler> {
        let terminal = self.terminal_fn().map(terminal_layer);
        let handler = fold(self.layers().iter().chain(terminal.as_ref()));

        match &handler {
            Some(_) => tracing::debug!(
                layers = self.layers().len(),
                terminal = terminal.is_some(),
                "composed handler chain"
            ),
            None => tracing::debug!("nothing to compose, chain is empty"),
        }
        handler
    }

    /// Sets the terminal function (if present) and composes.
    ///
    /// An absent `func` keeps the current terminal function.
    pub fn compose_with(&mut self, func: impl Into<Option<RequestFn>>) -> Option<BoxedHandler> {
        self.set_terminal_fn(func);
        self.compose()
    }

    /// Like [`compose`](Self::compose), but reports an empty chain as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Empty`] if there is nothing to compose.
    pub fn try_compose(&self) -> ChainResult<BoxedHandler> {
        self.compose().ok_or(ChainError::Empty)
    }
}

/// Lifts the terminal function into the innermost layer.
fn terminal_layer(func: &RequestFn) -> Layer {
    PrePost::new(func.clone()).as_pre()
}

/// Folds layers (outermost first) into a handler, innermost applied first.
fn fold<'a, I>(layers: I) -> Option<BoxedHandler>
where
    I: DoubleEndedIterator<Item = &'a Layer>,
{
    let mut layers = layers.rev();
    let innermost = layers.next()?.wrap(None);
    Some(layers.fold(innermost, |next, layer| layer.wrap(Some(next))))
}
