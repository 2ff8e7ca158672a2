use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
    time::sleep,
};
use url::Url;

pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn form_fields(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

pub struct MockWebhook {
    pub url: Url,
    handle: JoinHandle<CapturedRequest>,
}

impl MockWebhook {
    pub async fn request(self) -> CapturedRequest {
        self.handle.await.unwrap()
    }
}

/// Accepts a single HTTP request and answers it with the given status line.
pub async fn spawn_webhook(status: &'static str) -> MockWebhook {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let request = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request was complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(request) = parse_request(&buf) {
                break request;
            }
        };
        let response =
            format!("HTTP/1.1 {status}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    MockWebhook {
        url: Url::parse(&format!("http://{addr}/hook")).unwrap(),
        handle,
    }
}

/// Accepts every connection, reads once, then hangs up without answering. Returns the
/// number of connections accepted so far.
pub async fn spawn_hangup_webhook() -> (Url, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let mut chunk = [0u8; 4096];
            let _ = socket.read(&mut chunk).await;
            drop(socket);
        }
    });
    (Url::parse(&format!("http://{addr}/hook")).unwrap(), accepted)
}

/// Accepts connections and never writes a response.
pub async fn spawn_silent_webhook() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
            sleep(Duration::from_millis(10)).await;
        }
    });
    Url::parse(&format!("http://{addr}/hook")).unwrap()
}

/// A URL on a local port with nothing listening.
pub fn unused_local_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/hook")).unwrap()
}

fn parse_request(buf: &[u8]) -> Option<CapturedRequest> {
    let text = std::str::from_utf8(buf).ok()?;
    let (head, body) = text.split_once("\r\n\r\n")?;
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())?;
    if body.len() < length {
        return None;
    }
    Some(CapturedRequest {
        head: head.to_string(),
        body: body[..length].to_string(),
    })
}
