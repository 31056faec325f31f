//! End-to-end chain integration tests.
//!
//! Each test composes a chain and drives it with `GET /` through the
//! in-memory client. Every layer or function writes a literal tag, so the
//! response body records execution order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::StatusCode;
use lamina_core::{BoxedHandler, RequestFn};
use lamina_middleware::{Chain, Layer, PrePost};
use lamina_test::{TestClient, TestResponse};

/// A raw layer that writes `tag` and then calls the next handler.
fn tagging_layer(tag: &'static str) -> Layer {
    Layer::from_fn(move |writer, request, next| {
        Box::pin(async move {
            writer.write_str(tag);
            next.run(writer, request).await;
        })
    })
}

/// A request function that writes `tag`.
fn tag_fn(tag: &'static str) -> RequestFn {
    RequestFn::from_sync(move |writer, _| {
        writer.write_str(tag);
    })
}

async fn get_root(handler: Option<BoxedHandler>) -> TestResponse {
    TestClient::new(handler).get("/").send().await
}

async fn body_of(handler: Option<BoxedHandler>) -> String {
    let response = get_root(handler).await;
    response.assert_status(StatusCode::OK);
    response.text().unwrap()
}

// ============================================================================
// Request scenarios
// ============================================================================

#[tokio::test]
async fn test_empty_chain_serves_not_found() {
    let chain = Chain::new();
    let handler = chain.compose();
    assert!(handler.is_none());

    let response = get_root(handler).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(!response.body().is_empty());
}

#[tokio::test]
async fn test_raw_layers_without_terminal() {
    let chain = Chain::from_layers([tagging_layer("h1"), tagging_layer("h2")]).unwrap();
    assert_eq!(body_of(chain.compose()).await, "h1h2");
}

#[tokio::test]
async fn test_pre_functions_run_in_order() {
    let mut chain = Chain::new();
    chain.append_pre_fn(tag_fn("f1")).append_pre_fn(tag_fn("f2"));
    assert_eq!(body_of(chain.compose()).await, "f1f2");
}

#[tokio::test]
async fn test_post_functions_run_in_reverse() {
    let mut chain = Chain::new();
    chain.append_post_fn(tag_fn("f1")).append_post_fn(tag_fn("f2"));
    assert_eq!(body_of(chain.compose()).await, "f2f1");
}

#[tokio::test]
async fn test_raw_layers_with_terminal() {
    let mut chain = Chain::new();
    chain.append(tagging_layer("h1")).append(tagging_layer("h2"));
    assert_eq!(body_of(chain.compose_with(tag_fn("f1"))).await, "h1h2f1");
}

#[tokio::test]
async fn test_repeated_pre_function_with_terminal() {
    let f2 = tag_fn("f2");
    let mut chain = Chain::new();
    chain.append_pre_fn(f2.clone()).append_pre_fn(f2);
    assert_eq!(body_of(chain.compose_with(tag_fn("f1"))).await, "f2f2f1");
}

#[tokio::test]
async fn test_post_functions_with_absent_terminal() {
    let mut chain = Chain::new();
    chain.append_post_fn(tag_fn("f1")).append_post_fn(tag_fn("f2"));
    assert_eq!(body_of(chain.compose_with(None)).await, "f2f1");
}

#[tokio::test]
async fn test_terminal_runs_before_post_functions_unwind() {
    let mut chain = Chain::new();
    chain.append_post_fn(tag_fn("f1")).append_post_fn(tag_fn("f2"));
    assert_eq!(body_of(chain.compose_with(tag_fn("f0"))).await, "f0f2f1");

    let f2 = tag_fn("f2");
    let mut chain = Chain::new();
    chain.append_post_fn(f2.clone()).append_post_fn(f2);
    assert_eq!(body_of(chain.compose_with(tag_fn("f1"))).await, "f1f2f2");
}

#[tokio::test]
async fn test_pre_functions_with_terminal() {
    let mut chain = Chain::new();
    chain.append_pre_fn(tag_fn("f1")).append_pre_fn(tag_fn("f2"));
    assert_eq!(body_of(chain.compose_with(tag_fn("f0"))).await, "f1f2f0");
}

// ============================================================================
// Builder behavior observed through requests
// ============================================================================

#[tokio::test]
async fn test_insert_and_join_shape_execution() {
    let mut tail = Chain::new();
    tail.append_pre_fn(tag_fn("c")).set_terminal_fn(tag_fn("ignored"));

    let mut chain = Chain::new();
    chain
        .append_pre_fn(tag_fn("b"))
        .insert_pre_fn(tag_fn("a"), -3)
        .insert_pre_fn(tag_fn("z"), 99)
        .join(&tail)
        .join(None);

    assert_eq!(body_of(chain.compose()).await, "abzc");
}

#[tokio::test]
async fn test_alias_and_adapter_layers_mix() {
    let post = PrePost::new(tag_fn("post"));
    let pre = PrePost::new(tag_fn("pre"));

    let mut chain = Chain::new();
    chain
        .append(post.as_post())
        .append(pre.as_alias())
        .append(tagging_layer("raw"));

    assert_eq!(
        body_of(chain.compose_with(tag_fn("end"))).await,
        "prerawendpost"
    );
}

#[tokio::test]
async fn test_short_circuit_skips_terminal() {
    let gate = Layer::from_fn(|writer, request, next| {
        Box::pin(async move {
            if request.uri().path() == "/" {
                writer.write_header(StatusCode::UNAUTHORIZED);
                writer.write_str("denied");
                return;
            }
            next.run(writer, request).await;
        })
    });

    let mut chain = Chain::new();
    chain.append_post_fn(tag_fn("-audit")).append(gate);

    let response = get_root(chain.compose_with(tag_fn("secret"))).await;
    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_body_eq("denied-audit");
}

#[tokio::test]
async fn test_silent_chain_is_empty_ok() {
    let mut chain = Chain::new();
    chain.set_terminal_fn(RequestFn::from_sync(|_, _| {}));

    let response = get_root(chain.compose()).await;
    response.assert_status(StatusCode::OK).assert_body_eq("");
}

#[tokio::test]
async fn test_recomposition_is_stable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = Arc::clone(&calls);
        RequestFn::from_sync(move |writer, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            writer.write_str("t");
        })
    };

    let mut chain = Chain::new();
    chain.append_pre_fn(tag_fn("p"));
    let first = chain.compose_with(counted);
    let second = chain.compose();

    assert_eq!(chain.layers().len(), 1);
    assert_eq!(body_of(first).await, "pt");
    assert_eq!(body_of(second).await, "pt");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_composed_handler_serves_concurrent_requests() {
    let mut chain = Chain::new();
    chain.append_pre_fn(tag_fn("a")).append_post_fn(tag_fn("z"));
    let client = TestClient::new(chain.compose_with(tag_fn("m")));

    let requests = (0..16).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.get("/").send().await.text().unwrap() })
    });

    for request in requests.collect::<Vec<_>>() {
        assert_eq!(request.await.unwrap(), "amz");
    }
}
