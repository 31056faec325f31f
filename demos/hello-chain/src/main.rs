//! Hello Chain
//!
//! A small service built from a Lamina chain:
//!
//! 1. a raw layer that times every request
//! 2. a pre function that stamps a request number header
//! 3. a post function that appends a footer
//! 4. a terminal function that greets the caller
//!
//! Configuration comes from `HELLO_*` environment variables (see
//! [`ServerConfig::with_env`](lamina::server::ServerConfig::with_env)).
//! Set `HELLO_LOG_JSON=1` for JSON logs.
//!
//! ```text
//! $ curl -i localhost:8080/world
//! HTTP/1.1 200 OK
//! x-request-number: 1
//!
//! hello, world
//! -- served by hello-chain
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::Context;
use lamina::prelude::*;
use tracing::info;

const ENV_PREFIX: &str = "HELLO";

fn timing_layer() -> Layer {
    Layer::from_fn(|writer, request, next| {
        Box::pin(async move {
            let started = Instant::now();
            next.run(writer, request).await;
            info!(
                method = %request.method(),
                path = %request.uri().path(),
                status = writer.status().map_or(200, |s| s.as_u16()),
                elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                "request served"
            );
        })
    })
}

fn request_number() -> RequestFn {
    let counter = AtomicU64::new(0);
    RequestFn::from_sync(move |writer, _| {
        let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
        writer.headers_mut().insert("x-request-number", n.into());
    })
}

fn footer() -> RequestFn {
    RequestFn::from_sync(|writer, _| {
        writer.write_str("\n-- served by hello-chain\n");
    })
}

fn greet() -> RequestFn {
    RequestFn::from_sync(|writer, request| {
        let name = request.uri().path().trim_matches('/');
        let name = if name.is_empty() { "stranger" } else { name };
        writer.write_str(&format!("hello, {name}"));
    })
}

fn build_chain() -> Chain {
    let mut chain = Chain::new();
    chain
        .append(timing_layer())
        .append_pre_fn(request_number())
        .append_post_fn(footer());
    chain
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_config = if std::env::var(format!("{ENV_PREFIX}_LOG_JSON")).is_ok() {
        LogConfig::production()
    } else {
        LogConfig::development().with_level("info")
    };
    init_logging(&log_config).context("initializing logging")?;

    let config = ServerConfig::from_env(ENV_PREFIX).context("reading server configuration")?;
    let mut chain = build_chain();
    let handler = chain.compose_with(greet());

    info!(layers = chain.len(), addr = config.http_addr(), "starting hello-chain");

    Server::builder()
        .config(config)
        .handler(handler)
        .build()
        .run()
        .await
        .context("running server")?;

    Ok(())
}
