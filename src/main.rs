//! swserve: a local static file server for Service Worker development.
//!
//! Serves the document root over HTTP/1.1 and stamps the configured extra
//! headers (by default `Service-Worker-Allowed: /`) onto every response, so
//! a worker registered from a sub-path can claim the whole origin.

use std::sync::Arc;

use tokio::sync::Notify;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use error::ServerError;

fn main() -> Result<(), ServerError> {
    let cfg = config::Config::load()?;

    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(run(cfg))
}

async fn run(cfg: config::Config) -> Result<(), ServerError> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg)?);

    let listener = server::create_listener(addr).map_err(|source| {
        logger::log_error(&format!("Failed to bind {addr}: {source}"));
        ServerError::Bind { addr, source }
    })?;

    logger::log_server_start(&addr, &state.root, &state.config);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    server::run_until_shutdown(listener, state, shutdown).await;
    Ok(())
}
