//! Lifting plain request functions into layers.
//!
//! [`PrePost`] binds one [`RequestFn`] and derives layers that run it either
//! before (`pre`) or after (`post`) the downstream handler:
//!
//! ```text
//! as_pre:   func  -> next
//! as_post:  next  -> func
//! ```
//!
//! Both the function and the downstream handler are optional and are checked
//! on every request, so a missing one is simply skipped.

use std::sync::Arc;

use lamina_core::{BoxFuture, BoxedHandler, Handler, Request, RequestFn, ResponseWriter};

use crate::layer::Layer;

/// Where the bound function runs relative to the downstream handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Run the function, then the downstream handler.
    Pre,
    /// Run the downstream handler, then the function.
    Post,
}

/// Binds a request function to its pre/post wrapping behavior.
///
/// Every call to [`as_pre`](Self::as_pre), [`as_post`](Self::as_post) or
/// [`as_alias`](Self::as_alias) returns a fresh [`Layer`]; two layers derived
/// from the same adapter are never [`Layer::ptr_eq`].
///
/// # Example
///
/// ```
/// use lamina_core::RequestFn;
/// use lamina_middleware::PrePost;
///
/// let log = RequestFn::from_sync(|_writer, request| {
///     tracing::info!(path = %request.uri().path(), "request served");
/// });
///
/// let after = PrePost::new(log).as_post();
/// # let _ = after;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrePost {
    func: Option<RequestFn>,
}

impl PrePost {
    /// Creates an adapter over an optional request function.
    pub fn new(func: impl Into<Option<RequestFn>>) -> Self {
        Self { func: func.into() }
    }

    /// Returns the bound function.
    pub fn func(&self) -> Option<&RequestFn> {
        self.func.as_ref()
    }

    /// Derives a layer that runs the function before the downstream handler.
    pub fn as_pre(&self) -> Layer {
        self.layer(Placement::Pre)
    }

    /// Derives a layer that runs the function after the downstream handler.
    pub fn as_post(&self) -> Layer {
        self.layer(Placement::Post)
    }

    /// Same as [`as_pre`](Self::as_pre).
    pub fn as_alias(&self) -> Layer {
        self.as_pre()
    }

    /// Derives a layer with the given placement.
    pub fn layer(&self, placement: Placement) -> Layer {
        let func = self.func.clone();
        Layer::new(move |next| {
            let handler: BoxedHandler = Arc::new(PlacedHandler {
                func: func.clone(),
                next,
                placement,
            });
            handler
        })
    }
}

/// Handler produced by a [`PrePost`] layer.
struct PlacedHandler {
    func: Option<RequestFn>,
    next: Option<BoxedHandler>,
    placement: Placement,
}

impl Handler for PlacedHandler {
    fn serve<'a>(
        &'a self,
        writer: &'a mut ResponseWriter,
        request: &'a Request,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            match self.placement {
                Placement::Pre => {
                    if let Some(func) = &self.func {
                        func.call(writer, request).await;
                    }
                    if let Some(next) = &self.next {
                        next.serve(writer, request).await;
                    }
                }
                Placement::Post => {
                    if let Some(next) = &self.next {
                        next.serve(writer, request).await;
                    }
                    if let Some(func) = &self.func {
                        func.call(writer, request).await;
                    }
                }
            }
        })
    }
}
