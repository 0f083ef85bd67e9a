mod common;

use std::net::SocketAddr;
use std::time::Duration;

use common::{TempRoot, test_config};
use hearth::config::Config;
use hearth::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const BAD_REQUEST: &[u8] = b"HTTP/1.0 400 Bad Request\nConnection: keep-alive\n";
const TIMEOUT_NOTICE: &[u8] = b"\nConnection to server lost\n";

/// Accept one connection and serve it to completion.
async fn serve_once(cfg: Config) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut conn = Connection::new(socket, &cfg);
        let _ = conn.run().await;
    });

    (addr, handle)
}

/// Read until the collected bytes contain `needle`, with a hard deadline so
/// a wedged test fails instead of hanging.
async fn read_until(stream: &mut TcpStream, needle: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        if buf.windows(needle.len().max(1)).any(|w| w == needle) {
            return buf;
        }
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut chunk))
            .await
            .expect("read deadline hit")
            .unwrap();
        if n == 0 {
            return buf;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn quick_config(root: &TempRoot) -> Config {
    let mut cfg = test_config(root.path());
    cfg.server.timeout_ms = 500;
    cfg
}

#[tokio::test]
async fn test_serves_index_for_root_resource() {
    let root = TempRoot::new();
    root.write_file("index.html", b"hello hearth");

    let (addr, _handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();

    let reply = read_until(&mut client, b"hello hearth").await;
    let text = String::from_utf8_lossy(&reply);

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Length: 12\r\n"));
    assert!(text.contains("Content-Type: text/html\r\n"));
}

#[tokio::test]
async fn test_connection_survives_across_requests() {
    let root = TempRoot::new();
    root.write_file("index.html", b"first page");
    root.write_file("other.txt", b"second page");

    let (addr, _handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    read_until(&mut client, b"first page").await;

    client
        .write_all(b"GET /other.txt HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    let reply = read_until(&mut client, b"second page").await;

    assert!(String::from_utf8_lossy(&reply).starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_overlong_request_line_gets_literal_400() {
    let root = TempRoot::new();
    root.write_file("index.html", b"irrelevant");

    let (addr, _handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client
        .write_all(b"GET / HTTP/1.1 extra\r\n")
        .await
        .unwrap();

    let reply = read_until(&mut client, b"keep-alive\n").await;
    assert_eq!(reply, BAD_REQUEST);
}

#[tokio::test]
async fn test_conditional_get_over_the_wire() {
    let root = TempRoot::new();
    root.write_file("index.html", b"cached content");

    let (addr, _handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client
        .write_all(
            b"GET / HTTP/1.1\r\nIf-Modified-Since: Fri, 01 Jan 2100 00:00:00 GMT\r\n\r\n",
        )
        .await
        .unwrap();

    let reply = read_until(&mut client, b"Connection: Keep-Alive\r\n").await;
    let text = String::from_utf8_lossy(&reply);

    assert!(text.starts_with("HTTP/1.1 304 Not Modified\r\n"));
    assert!(text.contains("Last-Modified: "));
    assert!(!text.contains("cached content"));
}

#[tokio::test]
async fn test_silent_connection_gets_timeout_notice() {
    let root = TempRoot::new();
    root.write_file("index.html", b"irrelevant");

    let (addr, handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), client.read_to_end(&mut buf))
        .await
        .expect("server never closed the connection")
        .unwrap();

    assert_eq!(buf, TIMEOUT_NOTICE);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unfinished_request_gets_no_response_before_timeout() {
    let root = TempRoot::new();
    root.write_file("index.html", b"never sent");

    let (addr, _handle) = serve_once(quick_config(&root)).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    // request line only, headers never terminated
    client.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), client.read_to_end(&mut buf))
        .await
        .expect("server never closed the connection")
        .unwrap();

    assert_eq!(buf, TIMEOUT_NOTICE);
}
