//! Collected test responses.

use bytes::Bytes;
use http::{header, HeaderMap, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use lamina_core::Response;

use crate::error::TestError;

/// A fully collected response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Collects `response` into a test response.
    pub async fn from_response(response: Response) -> Self {
        let (parts, body) = response.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(never) => match never {},
        };

        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid.
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|value| value.to_str().ok())
    }

    /// Returns the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a UTF-8 string.
    pub fn text(&self) -> Result<String, TestError> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status differs.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "expected status {expected}, got {} with body {:?}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts the body equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body differs.
    #[track_caller]
    pub fn assert_body_eq(&self, expected: impl AsRef<str>) -> &Self {
        assert_eq!(String::from_utf8_lossy(&self.body), expected.as_ref());
        self
    }

    /// Asserts a header value.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or differs.
    #[track_caller]
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        assert_eq!(
            self.header_str(name),
            Some(expected.as_ref()),
            "header {name}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn response(status: StatusCode, body: &'static [u8]) -> Response {
        let mut response = Response::new(Full::new(Bytes::from_static(body)));
        *response.status_mut() = status;
        response
    }

    #[tokio::test]
    async fn test_text_and_status() {
        let res = TestResponse::from_response(response(StatusCode::CREATED, b"made")).await;
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.text().unwrap(), "made");
        res.assert_status(StatusCode::CREATED).assert_body_eq("made");
    }

    #[tokio::test]
    async fn test_json() {
        let res = TestResponse::from_response(response(StatusCode::OK, br#"{"n":3}"#)).await;
        let value: serde_json::Value = res.json().unwrap();
        assert_eq!(value["n"], 3);
    }

    #[tokio::test]
    async fn test_non_utf8_body() {
        let res = TestResponse::from_response(response(StatusCode::OK, &[0xff, 0xfe])).await;
        assert!(matches!(res.text(), Err(TestError::BodyNotUtf8(_))));
    }
}
