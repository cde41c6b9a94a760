//! Runs the real binary: bind failures, startup output and signal shutdown

#![cfg(unix)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

const BIN: &str = env!("CARGO_BIN_EXE_static-devserver");

fn devserver(root: &std::path::Path, port: u16) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(root)
        .args(["--host", "127.0.0.1", "--port", &port.to_string(), "--no-browser"])
        .arg("--root")
        .arg(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Read stdout until the banner names the bound port; the handle yields the rest
fn wait_for_port(child: &mut Child) -> (u16, JoinHandle<String>) {
    let stdout = child.stdout.take().unwrap();
    let mut reader = BufReader::new(stdout);
    let mut seen = Vec::new();

    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).unwrap();
        assert!(n > 0, "server exited before listening: {seen:#?}");
        let line = line.trim_end().to_string();
        if let Some(url) = line.strip_prefix("Listening on: http://127.0.0.1:") {
            let port = url.parse().unwrap();
            let rest = thread::spawn(move || {
                let mut rest = String::new();
                let _ = reader.read_to_string(&mut rest);
                rest
            });
            return (port, rest);
        }
        seen.push(line);
    }
}

fn interrupt(child: &Child) {
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

fn http_get(port: u16, path: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn occupied_port_fails_with_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let output = devserver(dir.path(), port).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to bind"), "stderr: {stderr}");
    assert!(stderr.contains(&port.to_string()), "stderr: {stderr}");
}

#[test]
fn missing_root_fails_with_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(BIN)
        .current_dir(dir.path())
        .args(["--port", "0", "--no-browser", "--root"])
        .arg(dir.path().join("does-not-exist"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("[ERROR]"));
}

#[test]
fn interrupt_stops_cleanly_and_frees_port() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>hello</p>").unwrap();

    let mut child = devserver(dir.path(), 0).spawn().unwrap();
    let (port, rest) = wait_for_port(&mut child);

    let response = http_get(port, "/");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.to_ascii_lowercase().contains("access-control-allow-origin: *"));
    assert!(response.ends_with("<p>hello</p>"));

    interrupt(&child);

    let exit = child.wait().unwrap();
    assert!(exit.success(), "exit status: {exit:?}");

    let stdout = rest.join().unwrap();
    assert!(stdout.contains("Root directory:"), "{stdout}");
    assert!(stdout.contains("GET / 200"), "{stdout}");
    assert!(stdout.contains("Shutting down server..."), "{stdout}");
    assert!(stdout.trim_end().ends_with("Server stopped"), "{stdout}");

    TcpListener::bind(("127.0.0.1", port)).expect("port should be free after shutdown");
}

#[test]
fn interrupt_right_after_startup_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    for _ in 0..10 {
        let mut child = devserver(dir.path(), 0).spawn().unwrap();
        let (port, rest) = wait_for_port(&mut child);
        interrupt(&child);

        let exit = child.wait().unwrap();
        assert!(exit.success(), "exit status: {exit:?}");
        let stdout = rest.join().unwrap();
        assert!(stdout.trim_end().ends_with("Server stopped"), "{stdout}");

        TcpListener::bind(("127.0.0.1", port)).expect("port should be free after shutdown");
    }
}
