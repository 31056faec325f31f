//! Test request building.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use http_body_util::Full;
use serde::Serialize;

use lamina_core::Request;

use crate::error::TestError;

/// Builder for requests sent through a [`TestClient`](crate::TestClient).
///
/// Invalid input does not panic while building; the first problem is kept
/// and reported by [`build`](Self::build).
#[must_use]
#[derive(Debug)]
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
    error: Option<TestError>,
}

impl TestRequest {
    /// Creates a request with the given method and URI.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            error: None,
        }
    }

    /// Creates a GET request.
    pub fn get(uri: impl AsRef<str>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Creates a POST request.
    pub fn post(uri: impl AsRef<str>) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Sets a header, replacing any previous value.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let name = HeaderName::try_from(name.as_ref());
        let value = HeaderValue::try_from(value.as_ref());
        match (name, value) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => self.error = Some(TestError::InvalidHeader(e.to_string())),
            (_, Err(e)) => self.error = Some(TestError::InvalidHeader(e.to_string())),
        }
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = Bytes::from(bytes);
                self.content_type("application/json")
            }
            Err(e) => {
                self.error.get_or_insert(TestError::Json(e));
                self
            }
        }
    }

    /// Assembles the HTTP request.
    pub fn build(self) -> Result<Request, TestError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut request = http::Request::builder()
            .method(self.method)
            .uri(self.uri.as_str())
            .body(Full::new(self.body))
            .map_err(|e| TestError::RequestBuild(e.to_string()))?;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_get() {
        let request = TestRequest::get("/users?page=2")
            .header("X-Request-Id", "abc")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().path(), "/users");
        assert_eq!(request.uri().query(), Some("page=2"));
        assert_eq!(request.headers().get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn test_json_body() {
        let request = TestRequest::post("/items")
            .json(&serde_json::json!({ "name": "widget" }))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_invalid_header_is_reported_on_build() {
        let err = TestRequest::get("/")
            .header("bad header", "x")
            .header("x-ok", "fine")
            .build()
            .unwrap_err();

        assert!(matches!(err, TestError::InvalidHeader(_)));
    }

    #[test]
    fn test_invalid_uri() {
        let err = TestRequest::get("http://[::1").build().unwrap_err();
        assert!(matches!(err, TestError::RequestBuild(_)));
    }
}
