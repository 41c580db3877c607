//! Shared helpers for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::path::{Path, PathBuf};

use serde_json::json;

/// An `http://` endpoint with nothing listening behind it.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/indexnow")
}

/// An endpoint that answers one request with `status` and a body cut short.
///
/// The response announces more bytes than it sends, then closes the
/// connection, so reading the body fails after the status line arrived.
pub fn truncated_body_endpoint(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let read = stream.read(&mut chunk).expect("read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
            if request_complete(&request) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: 64\r\n\r\n{{\"error\""
        );
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush response");
    });
    format!("http://{addr}/token")
}

fn request_complete(request: &[u8]) -> bool {
    let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..head_end]).to_ascii_lowercase();
    let body_len = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= head_end + 4 + body_len
}

/// Write a `routes-manifest.json` listing `pages` as static routes.
pub fn write_static_routes(build_dir: &Path, pages: &[&str]) {
    let routes: Vec<_> = pages
        .iter()
        .map(|page| json!({ "page": page, "regex": format!("^{page}$") }))
        .collect();
    let manifest = json!({ "version": 3, "staticRoutes": routes, "dynamicRoutes": [] });
    fs::create_dir_all(build_dir).unwrap();
    fs::write(
        build_dir.join("routes-manifest.json"),
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
