// Connection handling.
// Each accepted connection is served on its own spawned task; hyper's http1
// machinery handles request framing, keep-alive, and malformed-request (400)
// rejection.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one accepted connection in a spawned task.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        // A client hanging up mid-exchange lands here too; the error is
        // logged and dies with this task, never with the server.
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
