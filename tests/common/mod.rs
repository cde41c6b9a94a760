#![allow(dead_code)]

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::HOST;
use hyper::{HeaderMap, Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use static_devserver::config::{AppState, Config};
use static_devserver::logger::{LogCapture, LogWriter};
use static_devserver::{DevServer, ServerError};

/// An in-process server on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub log: LogCapture,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), ServerError>>,
}

pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.root_directory = root.to_path_buf();
    config.browser.open = false;
    config
}

impl TestServer {
    pub async fn start(config: Config) -> Self {
        let (log, capture) = LogWriter::capture();
        let state = Arc::new(AppState::new(config, log).unwrap());
        let server = DevServer::bind(state).await.unwrap();
        let addr = server.local_addr();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run_until(async {
            let _ = rx.await;
        }));

        Self {
            addr,
            log: capture,
            shutdown: Some(tx),
            handle,
        }
    }

    pub async fn serve_dir(root: &Path) -> Self {
        Self::start(test_config(root)).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, &[]).await
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        send(self.addr, method, path, headers).await
    }

    /// Trigger shutdown and wait for the serve loop to return
    pub async fn stop(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_dev_headers(&self) {
        assert_eq!(self.header("access-control-allow-origin"), Some("*"));
        assert_eq!(self.header("cache-control"), Some("no-cache"));
    }
}

/// Send one request over a fresh HTTP/1.1 connection
pub async fn send(
    addr: SocketAddr,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
) -> TestResponse {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);

    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(HOST, addr.to_string());
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = builder.body(Empty::<Bytes>::new()).unwrap();

    let response = sender.send_request(req).await.unwrap();
    let (parts, body) = response.into_parts();
    let body = body.collect().await.unwrap().to_bytes();

    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body,
    }
}
