//! The layer type and the [`Next`] callback.
//!
//! A [`Layer`] takes the downstream handler (which may be absent) and returns
//! a new handler wrapping it. Layers are plain values: cloning a layer shares
//! the callable, and identity is by reference ([`Layer::ptr_eq`]).
//!
//! # Example
//!
//! ```
//! use lamina_middleware::Layer;
//!
//! // Writes "h1" and then delegates downstream.
//! let h1 = Layer::from_fn(|writer, request, next| {
//!     Box::pin(async move {
//!         writer.write_str("h1");
//!         next.run(writer, request).await;
//!     })
//! });
//! # let _ = h1;
//! ```

use std::fmt;
use std::sync::Arc;

use lamina_core::{BoxFuture, BoxedHandler, Handler, Request, ResponseWriter};

type LayerFn = dyn Fn(Option<BoxedHandler>) -> BoxedHandler + Send + Sync;

/// A middleware layer: `Option<next> -> handler`.
///
/// The handler returned by a layer decides whether, and when, to invoke the
/// downstream handler it was given.
#[derive(Clone)]
pub struct Layer {
    func: Arc<LayerFn>,
}

impl Layer {
    /// Creates a layer from a wrapping function.
    ///
    /// The function is called once per composition, never per request.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Option<BoxedHandler>) -> BoxedHandler + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Creates a layer from a request-time closure receiving a [`Next`].
    ///
    /// The closure decides whether to call [`Next::run`]; not calling it
    /// short-circuits everything downstream.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: for<'a> Fn(&'a mut ResponseWriter, &'a Request, Next<'a>) -> BoxFuture<'a, ()>
            + Send
            + Sync
            + 'static,
    {
        let func = Arc::new(func);
        Self::new(move |next| {
            let handler: BoxedHandler = Arc::new(FnLayerHandler {
                func: Arc::clone(&func),
                next,
            });
            handler
        })
    }

    /// Applies the layer to a downstream handler.
    pub fn wrap(&self, next: Option<BoxedHandler>) -> BoxedHandler {
        (self.func)(next)
    }

    /// Returns `true` if both layers share the same callable.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.func, &b.func)
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("func", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// Callback to invoke the downstream handler.
///
/// A `Next` built from an absent handler is the end of the chain: running it
/// does nothing.
pub struct Next<'a> {
    handler: Option<&'a dyn Handler>,
}

impl<'a> Next<'a> {
    /// Creates a `Next` over an optional downstream handler.
    pub fn new(handler: Option<&'a dyn Handler>) -> Self {
        Self { handler }
    }

    /// Returns `true` if there is nothing downstream.
    pub fn is_end(&self) -> bool {
        self.handler.is_none()
    }

    /// Invokes the downstream handler, if any.
    ///
    /// This consumes `self` so it can only be called once.
    pub async fn run(self, writer: &mut ResponseWriter, request: &Request) {
        if let Some(handler) = self.handler {
            handler.serve(writer, request).await;
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("end", &self.is_end()).finish()
    }
}

/// Handler produced by [`Layer::from_fn`].
struct FnLayerHandler<F> {
    func: Arc<F>,
    next: Option<BoxedHandler>,
}

impl<F> Handler for FnLayerHandler<F>
where
    F: for<'a> Fn(&'a mut ResponseWriter, &'a Request, Next<'a>) -> BoxFuture<'a, ()>
        + Send
        + Sync
        + 'static,
{
    fn serve<'a>(
        &'a self,
        writer: &'a mut ResponseWriter,
        request: &'a Request,
    ) -> BoxFuture<'a, ()> {
        let next = Next::new(self.next.as_deref());
        (self.func)(writer, request, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::{empty_request, RequestFn};

    fn writing(text: &'static str) -> Layer {
        Layer::from_fn(move |writer, request, next| {
            Box::pin(async move {
                writer.write_str(text);
                next.run(writer, request).await;
            })
        })
    }

    #[tokio::test]
    async fn test_layer_without_next() {
        let handler = writing("h1").wrap(None);

        let mut writer = ResponseWriter::new();
        handler.serve(&mut writer, &empty_request("/")).await;
        assert_eq!(writer.body(), b"h1");
    }

    #[tokio::test]
    async fn test_layer_with_next() {
        let terminal: BoxedHandler = Arc::new(RequestFn::from_sync(|writer, _| {
            writer.write_str("end");
        }));
        let handler = writing("h1").wrap(Some(terminal));

        let mut writer = ResponseWriter::new();
        handler.serve(&mut writer, &empty_request("/")).await;
        assert_eq!(writer.body(), b"h1end");
    }

    #[tokio::test]
    async fn test_short_circuit() {
        let guard = Layer::from_fn(|writer, _request, _next| {
            Box::pin(async move {
                writer.write_header(http::StatusCode::FORBIDDEN);
            })
        });
        let terminal: BoxedHandler = Arc::new(RequestFn::from_sync(|writer, _| {
            writer.write_str("unreachable");
        }));
        let handler = guard.wrap(Some(terminal));

        let mut writer = ResponseWriter::new();
        handler.serve(&mut writer, &empty_request("/")).await;
        assert_eq!(writer.status(), Some(http::StatusCode::FORBIDDEN));
        assert!(writer.body().is_empty());
    }

    #[tokio::test]
    async fn test_next_end() {
        let next = Next::new(None);
        assert!(next.is_end());

        let mut writer = ResponseWriter::new();
        next.run(&mut writer, &empty_request("/")).await;
        assert!(!writer.is_written());
    }

    #[test]
    fn test_layer_identity() {
        let a = writing("a");
        let b = writing("a");
        let a_clone = a.clone();

        assert!(Layer::ptr_eq(&a, &a_clone));
        assert!(!Layer::ptr_eq(&a, &b));
    }
}
