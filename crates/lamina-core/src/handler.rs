//! Handler trait and request functions.
//!
//! A [`Handler`] is anything an HTTP server can drive per request: it is
//! given the shared [`ResponseWriter`] and the incoming [`Request`] and
//! completes once it has written what it wants.
//!
//! A [`RequestFn`] is the plain-function form of a handler. It implements
//! [`Handler`] directly, which is how a bare function becomes the terminal
//! of a chain.
//!
//! # Example
//!
//! ```
//! use lamina_core::{Handler, RequestFn, ResponseWriter, empty_request};
//!
//! # tokio_test::block_on(async {
//! let hello = RequestFn::new(|writer, _request| {
//!     Box::pin(async move {
//!         writer.write_str("hello");
//!     })
//! });
//!
//! let mut writer = ResponseWriter::new();
//! hello.serve(&mut writer, &empty_request("/")).await;
//! assert_eq!(writer.body(), b"hello");
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::types::Request;
use crate::writer::ResponseWriter;

/// A boxed future borrowing from the handler call.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased, shareable handler.
///
/// Composed chains are handed out in this form so one handler can serve many
/// concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

/// Something that serves a request by writing into a response sink.
///
/// # Invariants
///
/// - A handler MUST NOT assume it is the only writer; other handlers in the
///   same chain may write before or after it.
/// - A handler SHOULD NOT swallow failures of handlers it delegates to.
pub trait Handler: Send + Sync + 'static {
    /// Serves one request.
    fn serve<'a>(&'a self, writer: &'a mut ResponseWriter, request: &'a Request)
        -> BoxFuture<'a, ()>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve<'a>(
        &'a self,
        writer: &'a mut ResponseWriter,
        request: &'a Request,
    ) -> BoxFuture<'a, ()> {
        (**self).serve(writer, request)
    }
}

type RequestFnInner =
    dyn for<'a> Fn(&'a mut ResponseWriter, &'a Request) -> BoxFuture<'a, ()> + Send + Sync;

/// A plain request function: `(writer, request) -> ()`.
///
/// Cloning a `RequestFn` shares the underlying function; use
/// [`RequestFn::ptr_eq`] to compare by identity.
#[derive(Clone)]
pub struct RequestFn {
    func: Arc<RequestFnInner>,
}

impl RequestFn {
    /// Wraps an async request function.
    ///
    /// The closure returns a boxed future that may borrow both the writer and
    /// the request.
    pub fn new<F>(func: F) -> Self
    where
        F: for<'a> Fn(&'a mut ResponseWriter, &'a Request) -> BoxFuture<'a, ()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Wraps a synchronous request function.
    ///
    /// ```
    /// use lamina_core::RequestFn;
    ///
    /// let f1 = RequestFn::from_sync(|writer, _request| {
    ///     writer.write_str("f1");
    /// });
    /// # let _ = f1;
    /// ```
    pub fn from_sync<F>(func: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
    {
        Self::new(move |writer, request| {
            func(writer, request);
            Box::pin(std::future::ready(()))
        })
    }

    /// Invokes the function.
    pub fn call<'a>(
        &'a self,
        writer: &'a mut ResponseWriter,
        request: &'a Request,
    ) -> BoxFuture<'a, ()> {
        (self.func)(writer, request)
    }

    /// Returns `true` if both values share the same underlying function.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.func, &b.func)
    }
}

impl Handler for RequestFn {
    fn serve<'a>(
        &'a self,
        writer: &'a mut ResponseWriter,
        request: &'a Request,
    ) -> BoxFuture<'a, ()> {
        self.call(writer, request)
    }
}

impl fmt::Debug for RequestFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFn")
            .field("func", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}
