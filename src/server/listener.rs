// Listener module
// Creates the TCP listener the dev server accepts on

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEADDR` lets a restarted server bind while connections from the
/// previous run sit in `TIME_WAIT`. `SO_REUSEPORT` is deliberately left off:
/// binding a port another process is listening on must fail.
///
/// Must be called from within a Tokio runtime.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Windows semantics of SO_REUSEADDR allow stealing a bound port
    #[cfg(not(windows))]
    socket.set_reuse_address(true)?;

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
