//! Driving a handler for one request.
//!
//! [`dispatch`] is the request-level contract between the server and a
//! composed chain. It is shared by [`Server`](crate::Server) and by in-memory
//! test clients so both observe the same defaults:
//!
//! - no handler: `404 Not Found` with body `404 page not found\n`
//! - handler wrote nothing: `200 OK` with an empty body

use bytes::Bytes;
use http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, StatusCode};
use http_body_util::Full;

use lamina_core::{Handler, Request, Response, ResponseWriter};

/// Body of the response sent when no handler is configured.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Runs `handler` against `request` and returns the collected response.
pub async fn dispatch(handler: Option<&dyn Handler>, request: Request) -> Response {
    let Some(handler) = handler else {
        tracing::debug!(path = %request.uri().path(), "no handler configured");
        return not_found();
    };

    let mut writer = ResponseWriter::new();
    handler.serve(&mut writer, &request).await;

    if !writer.is_written() {
        tracing::trace!(path = %request.uri().path(), "handler wrote no response");
    }
    writer.into_response()
}

/// The default response when there is nothing to serve.
pub fn not_found() -> Response {
    let mut response = Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
        .headers_mut()
        .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

/// A plain-text response with the given status.
pub(crate) fn text_response(status: StatusCode, message: &'static str) -> Response {
    let mut response = Response::new(Full::new(Bytes::from_static(message.as_bytes())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use lamina_core::{empty_request, RequestFn};

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_without_handler() {
        let response = dispatch(None, empty_request("/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_dispatch_runs_handler() {
        let handler = RequestFn::from_sync(|writer, request| {
            writer.write_header(StatusCode::ACCEPTED);
            writer.write_str(request.uri().path());
        });

        let response = dispatch(Some(&handler), empty_request("/jobs")).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_text(response).await, "/jobs");
    }

    #[tokio::test]
    async fn test_dispatch_silent_handler() {
        let handler = RequestFn::from_sync(|_, _| {});

        let response = dispatch(Some(&handler), empty_request("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.is_empty());
    }

    #[test]
    fn test_text_response() {
        let response = text_response(StatusCode::GATEWAY_TIMEOUT, "timeout");
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
