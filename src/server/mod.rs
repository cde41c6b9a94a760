// Server module entry point
// Binding, the accept loop, signal-driven shutdown and the startup browser tab
//
// Lifecycle: Idle -> Binding -> Serving -> ShuttingDown -> Terminated.
// A bind failure goes straight from Binding to Terminated.

pub mod browser;
pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module file keeps its name under another one
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// A bound, not yet serving, dev server
pub struct DevServer {
    listener: TcpListener,
    state: Arc<AppState>,
    local_addr: SocketAddr,
}

impl DevServer {
    /// Resolve the configured host and bind the listener
    pub async fn bind(state: Arc<AppState>) -> Result<Self, ServerError> {
        let addr = state.config.server.socket_addr()?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            state,
            local_addr,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `http://{host}:{port}` with the configured host and the bound port
    pub fn url(&self) -> String {
        self.state.config.server.url_for_port(self.local_addr.port())
    }

    /// Serve until `shutdown` resolves, then close the listener
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        start_server_loop(self.listener, self.state, shutdown).await
    }
}

/// Full lifecycle: bind, announce, open the browser, serve until `shutdown`
pub async fn run<F>(state: Arc<AppState>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    let server = DevServer::bind(Arc::clone(&state)).await?;
    let url = server.url();
    let open_browser = state.config.browser.open;

    logger::log_server_start(&state.log, &url, state.root(), open_browser);
    if open_browser {
        browser::open_browser(&url, &state.log);
    }

    server.run_until(shutdown).await
}
