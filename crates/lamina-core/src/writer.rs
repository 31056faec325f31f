//! The response sink handed to every handler.
//!
//! A [`ResponseWriter`] accumulates status, headers and body as handlers run.
//! Several handlers in one chain usually write into the same writer, so body
//! writes append rather than replace.
//!
//! # Status semantics
//!
//! - The first [`write_header`](ResponseWriter::write_header) call commits the status.
//! - Later calls are ignored and logged as superfluous.
//! - Writing body bytes before any status commits `200 OK`.
//!
//! # Example
//!
//! ```
//! use lamina_core::ResponseWriter;
//! use http::StatusCode;
//!
//! let mut writer = ResponseWriter::new();
//! writer.write_str("h1");
//! writer.write_header(StatusCode::CREATED); // ignored, already committed
//! writer.write_str("h2");
//!
//! let response = writer.into_response();
//! assert_eq!(response.status(), StatusCode::OK);
//! ```

use bytes::BytesMut;
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

use crate::types::Response;

/// Collects the response produced by a chain of handlers.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    /// Creates an empty writer with no committed status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response headers for modification.
    ///
    /// Headers may be changed at any time before the writer is turned into a
    /// response.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Commits the response status.
    ///
    /// Only the first call has an effect.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            Some(committed) => {
                tracing::warn!(
                    committed = %committed,
                    ignored = %status,
                    "superfluous write_header call"
                );
            }
            None => self.status = Some(status),
        }
    }

    /// Appends bytes to the response body, returning the number written.
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> usize {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        let data = data.as_ref();
        self.body.extend_from_slice(data);
        data.len()
    }

    /// Appends a string to the response body.
    pub fn write_str(&mut self, text: &str) -> usize {
        self.write(text.as_bytes())
    }

    /// Returns the committed status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the body written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns `true` once a status or body bytes have been written.
    pub fn is_written(&self) -> bool {
        self.status.is_some()
    }

    /// Converts the collected state into an HTTP response.
    ///
    /// A writer that was never written to yields `200 OK` with an empty body.
    pub fn into_response(self) -> Response {
        let mut response = Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl std::fmt::Write for ResponseWriter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        ResponseWriter::write_str(self, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    #[test]
    fn test_new_writer_is_unwritten() {
        let writer = ResponseWriter::new();
        assert!(!writer.is_written());
        assert!(writer.status().is_none());
        assert!(writer.body().is_empty());
    }

    #[test]
    fn test_write_commits_ok() {
        let mut writer = ResponseWriter::new();
        assert_eq!(writer.write_str("f1"), 2);
        assert_eq!(writer.status(), Some(StatusCode::OK));
        assert!(writer.is_written());
    }

    #[test]
    fn test_first_write_header_wins() {
        let mut writer = ResponseWriter::new();
        writer.write_header(StatusCode::ACCEPTED);
        writer.write_header(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(writer.status(), Some(StatusCode::ACCEPTED));
    }

    #[test]
    fn test_writes_append() {
        let mut writer = ResponseWriter::new();
        writer.write_str("h1");
        writer.write(b"h2");
        assert_eq!(writer.body(), b"h1h2");
    }

    #[test]
    fn test_fmt_write() {
        use std::fmt::Write;

        let mut writer = ResponseWriter::new();
        write!(writer, "{}-{}", "a", 1).unwrap();
        assert_eq!(writer.body(), b"a-1");
    }

    #[tokio::test]
    async fn test_into_response() {
        let mut writer = ResponseWriter::new();
        writer
            .headers_mut()
            .insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        writer.write_header(StatusCode::CREATED);
        writer.write_str("done");

        let response = writer.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"done");
    }

    #[test]
    fn test_unwritten_into_response_is_ok() {
        let response = ResponseWriter::new().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
