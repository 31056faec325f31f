//! Common types used throughout the handler chain.
//!
//! This module re-exports the HTTP request and response types that handlers
//! and layers operate on.

use bytes::Bytes;
use http_body_util::Full;

/// The HTTP request type seen by handlers.
///
/// This is a standard `http::Request` with a fully collected `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type produced from a [`ResponseWriter`](crate::ResponseWriter).
pub type Response = http::Response<Full<Bytes>>;

/// Builds an empty `GET` request for `uri`.
///
/// Falls back to `/` when `uri` cannot be parsed.
pub fn empty_request(uri: &str) -> Request {
    let mut request = Request::new(Full::new(Bytes::new()));
    if let Ok(parsed) = uri.parse() {
        *request.uri_mut() = parsed;
    }
    request
}
