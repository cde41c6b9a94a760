// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// Pause after running out of file descriptors before accepting again
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// What to do after a failed `accept`
#[derive(Debug, PartialEq, Eq)]
enum AcceptFailure {
    /// Only the pending connection is affected
    Connection,
    /// Out of descriptors; wait for connections to close
    Exhausted,
    /// The listener itself is broken
    Fatal,
}

fn classify_accept_error(err: &io::Error) -> AcceptFailure {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock
        | io::ErrorKind::TimedOut => AcceptFailure::Connection,
        // ENFILE / EMFILE
        _ if matches!(err.raw_os_error(), Some(23 | 24)) => AcceptFailure::Exhausted,
        _ => AcceptFailure::Fatal,
    }
}

/// Accept loop: dispatch each connection until `shutdown` resolves.
///
/// Returns `Ok(())` once shutdown was requested and the listener has been
/// closed, or `Err` if accepting failed in a way the loop cannot recover from.
/// Connections already accepted keep running in their own tasks.
pub async fn start_server_loop<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => match classify_accept_error(&e) {
                        AcceptFailure::Connection => {
                            logger::log_warning(&state.log, &format!("Failed to accept connection: {e}"));
                        }
                        AcceptFailure::Exhausted => {
                            logger::log_error(&state.log, &format!("Failed to accept connection: {e}"));
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                        }
                        AcceptFailure::Fatal => return Err(ServerError::Accept(e)),
                    },
                }
            }

            () = &mut shutdown => break,
        }
    }

    logger::log_shutdown_started(&state.log);
    drop(listener);
    logger::log_shutdown_complete(&state.log);
    Ok(())
}
