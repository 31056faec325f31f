//! Test client for in-memory HTTP testing.

use http::Method;

use lamina_core::{BoxedHandler, Request};

use crate::error::TestError;
use crate::request::TestRequest;
use crate::response::TestResponse;

/// Sends requests straight into a handler, without sockets.
///
/// Requests go through [`lamina_server::dispatch`], so a client built from
/// `None` answers `404 Not Found` exactly like a server with no handler.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use lamina_core::{BoxedHandler, RequestFn};
/// use lamina_test::TestClient;
///
/// # tokio_test::block_on(async {
/// let handler: BoxedHandler = Arc::new(RequestFn::from_sync(|writer, _| {
///     writer.write_str("pong");
/// }));
///
/// let client = TestClient::new(handler);
/// let response = client.get("/ping").send().await;
/// assert_eq!(response.text().unwrap(), "pong");
/// # });
/// ```
#[must_use]
#[derive(Clone, Default)]
pub struct TestClient {
    handler: Option<BoxedHandler>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client serving `handler`; `None` means "no handler".
    pub fn new(handler: impl Into<Option<BoxedHandler>>) -> Self {
        Self {
            handler: handler.into(),
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Starts a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Starts a request with a custom method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let builder = self
            .default_headers
            .iter()
            .fold(TestRequest::new(method, uri), |builder, (name, value)| {
                builder.header(name, value)
            });
        TestClientRequest {
            client: self,
            builder,
        }
    }

    /// Sends an already built request.
    pub async fn send_request(&self, request: Request) -> TestResponse {
        let response = lamina_server::dispatch(self.handler.as_deref(), request).await;
        TestResponse::from_response(response).await
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("has_handler", &self.handler.is_some())
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// A request builder bound to a [`TestClient`].
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequest,
}

impl TestClientRequest<'_> {
    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<bytes::Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built; use
    /// [`try_send`](Self::try_send) to handle that case.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }

    /// Sends the request, reporting build failures.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.send_request(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use lamina_core::RequestFn;
    use std::sync::Arc;

    fn echo_handler() -> BoxedHandler {
        Arc::new(RequestFn::from_sync(|writer, request| {
            let trace = request
                .headers()
                .get("x-trace")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            writer.write_str(&format!(
                "{} {} {trace}",
                request.method(),
                request.uri().path()
            ));
        }))
    }

    #[tokio::test]
    async fn test_no_handler_is_not_found() {
        let client = TestClient::new(None);
        let response = client.get("/").send().await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(!response.body().is_empty());
    }

    #[tokio::test]
    async fn test_echo() {
        let client = TestClient::new(echo_handler()).with_default_header("x-trace", "t1");

        let response = client.post("/items").body("abc").send().await;
        response
            .assert_status(StatusCode::OK)
            .assert_body_eq("POST /items t1");
    }

    #[tokio::test]
    async fn test_try_send_reports_invalid_header() {
        let client = TestClient::new(echo_handler());
        let result = client.get("/").header("bad header", "x").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }
}
