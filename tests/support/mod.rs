//! A one-shot HTTP stub standing in for the Pastery endpoint.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

pub struct CapturedRequest {
    pub request_line: String,
    pub headers: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn query(&self) -> Vec<(String, String)> {
        let target = self.request_line.split(' ').nth(1).unwrap_or_default();
        let url = reqwest::Url::parse(&format!("http://stub{}", target)).expect("request target");
        url.query_pairs().into_owned().collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

pub struct StubServer {
    pub url: String,
    worker: thread::JoinHandle<CapturedRequest>,
}

impl StubServer {
    /// Answer the first request with `status_line` (e.g. `200 OK`) and a
    /// JSON `body`, then stop.
    pub fn reply(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let url = format!(
            "http://{}/api/paste/",
            listener.local_addr().expect("listener addr")
        );
        let worker = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .expect("read timeout");
            let captured = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
            captured
        });
        StubServer { url, worker }
    }

    pub fn captured(self) -> CapturedRequest {
        self.worker.join().expect("stub server thread")
    }
}

/// Address nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    drop(listener);
    format!("http://{}/api/paste/", addr)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    CapturedRequest {
        request_line: request_line.to_string(),
        headers: headers.to_string(),
        body: buf[body_start..].to_vec(),
    }
}
