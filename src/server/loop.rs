// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::ServeState;
use crate::logger;

/// Run the accept loop on `listener` until `shutdown` completes.
///
/// Accept errors are logged and the loop keeps going. When `shutdown`
/// fires the listener is dropped (closing the port); connections already
/// handed to their tasks are left to finish on their own.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop<S>(
    listener: TcpListener,
    state: Arc<ServeState>,
    shutdown: S,
) -> std::io::Result<()>
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => {
                break;
            }
        }
    }

    drop(listener);
    logger::log_server_stopped();
    Ok(())
}
