//! HTTP server hosting a composed handler.
//!
//! The server accepts HTTP/1 connections with hyper on tokio, collects each
//! request body, and hands the request to [`dispatch`]. One composed handler
//! serves every connection.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lamina_core::{BoxedHandler, RequestFn};
//! use lamina_server::{Server, ServerConfig};
//!
//! # async fn run() -> Result<(), lamina_server::ServerError> {
//! let handler: BoxedHandler = Arc::new(RequestFn::from_sync(|writer, _| {
//!     writer.write_str("hello");
//! }));
//!
//! Server::builder()
//!     .config(ServerConfig::builder().http_addr("127.0.0.1:8080").build())
//!     .handler(handler)
//!     .build()
//!     .run()
//!     .await
//! # }
//! ```

use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

use lamina_core::{BoxedHandler, Request, Response};

use crate::config::ServerConfig;
use crate::dispatch::{dispatch, text_response};
use crate::error::ServerError;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    handler: Option<BoxedHandler>,
}

impl Server {
    /// Creates a server with the given configuration and handler.
    ///
    /// An absent handler answers every request with `404 Not Found`.
    #[must_use]
    pub fn new(config: ServerConfig, handler: Option<BoxedHandler>) -> Self {
        Self { config, handler }
    }

    /// Creates a new server builder.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the handler, if one is configured.
    pub fn handler(&self) -> Option<&BoxedHandler> {
        self.handler.as_ref()
    }

    /// Runs until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_with_shutdown(ShutdownSignal::with_os_signals()).await
    }

    /// Runs until `shutdown` is triggered.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Binds the configured address.
    ///
    /// Binding separately from [`serve`](Self::serve) lets callers learn the
    /// actual port when configured with port `0`.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serves connections from `listener` until `shutdown` is triggered.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!(addr = %local_addr, "server listening");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote_addr)) => {
                        let server = Arc::clone(&server);
                        let token = tracker.acquire();
                        let shutdown = shutdown.clone();

                        tokio::spawn(async move {
                            if let Err(e) = server.handle_connection(stream, remote_addr, shutdown).await {
                                tracing::error!(remote = %remote_addr, error = %e, "connection error");
                            }
                            drop(token);
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                },
                () = shutdown.recv() => {
                    tracing::info!("shutdown signal received, stopping server");
                    break;
                }
            }
        }

        let shutdown_timeout = server.config.shutdown_timeout();
        tracing::info!(
            timeout = ?shutdown_timeout,
            connections = tracker.active_connections(),
            "waiting for connections to close"
        );

        tokio::select! {
            () = tracker.wait_for_drain() => tracing::info!("all connections closed"),
            () = tokio::time::sleep(shutdown_timeout) => tracing::warn!(
                connections = tracker.active_connections(),
                "shutdown timeout reached"
            ),
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn handle_connection(
        self: &Arc<Self>,
        stream: TcpStream,
        remote_addr: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(self);

        let service = service_fn(move |request: http::Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle_request(request).await) }
        });

        let conn = http1::Builder::new().serve_connection(io, service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => return result,
            () = shutdown.recv() => {
                tracing::debug!(remote = %remote_addr, "closing connection for shutdown");
                conn.as_mut().graceful_shutdown();
            }
        }

        // Lets the in-flight response finish before the connection closes.
        conn.await
    }

    async fn handle_request<B>(&self, request: http::Request<B>) -> Response
    where
        B: Body<Data = Bytes>,
        B::Error: fmt::Display,
    {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        tracing::debug!(%method, %path, "request");

        let deadline = Instant::now() + self.config.request_timeout();
        let request = match tokio::time::timeout_at(deadline, collect_request(request)).await {
            Ok(Ok(request)) => request,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to read request body");
                return text_response(StatusCode::BAD_REQUEST, "failed to read request body\n");
            }
            Err(_) => {
                tracing::warn!(%method, %path, "request body timed out");
                return text_response(StatusCode::REQUEST_TIMEOUT, "request body timed out\n");
            }
        };

        let handler = self.handler.as_deref();
        match tokio::time::timeout_at(deadline, dispatch(handler, request)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(%method, %path, "handler timed out");
                text_response(StatusCode::GATEWAY_TIMEOUT, "handler timed out\n")
            }
        }
    }
}

async fn collect_request<B>(request: http::Request<B>) -> Result<Request, B::Error>
where
    B: Body<Data = Bytes>,
{
    let (parts, body) = request.into_parts();
    let bytes = body.collect().await?.to_bytes();
    Ok(Request::from_parts(parts, Full::new(bytes)))
}

/// Builder for [`Server`].
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<ServerConfig>,
    handler: Option<BoxedHandler>,
}

impl ServerBuilder {
    /// Creates a builder with default configuration and no handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the handler; `None` keeps the server in "no handler" mode.
    #[must_use]
    pub fn handler(mut self, handler: impl Into<Option<BoxedHandler>>) -> Self {
        self.handler = handler.into();
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server::new(self.config.unwrap_or_default(), self.handler)
    }
}
