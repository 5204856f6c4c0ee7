// Connection handling module
// Serves a single accepted TCP connection on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ServeState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with keep-alive
/// 3. Drops clients that stall while sending request headers
///
/// The header-read timeout also bounds the idle wait between keep-alive
/// requests. It is never applied to writing a response, so large files
/// to slow readers are sent in full.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<ServeState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder
            .keep_alive(true)
            .timer(TokioTimer::new())
            .header_read_timeout(state.header_read_timeout);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, &state, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            if !is_routine_close(&err) {
                logger::log_connection_error(&err);
            }
        }
    });
}

/// Idle keep-alive expiry and clients hanging up mid-request
fn is_routine_close(err: &hyper::Error) -> bool {
    err.is_timeout() || err.is_incomplete_message() || err.is_closed() || err.is_canceled()
}
