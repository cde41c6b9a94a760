// Connection handling module
// Serves a single accepted TCP connection with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// The connection is served over HTTP/1.1 with keep-alive. Each request on it
/// goes through [`handler::handle_request`]; connection-level failures are
/// logged and never affect the accept loop.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let log = state.log.clone();

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, peer_addr, state).await }
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            // Browsers routinely drop idle keep-alive connections mid-read
            if !err.is_incomplete_message() {
                logger::log_connection_error(&log, &err);
            }
        }
    });
}
