//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned archive response. `None` from a handler drops the connection
/// without writing anything, simulating an unreachable/broken upstream.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockResponse {
    /// A 200 response with the given content-type and body.
    pub fn with_body(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    /// Add a header to the canned response.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Start a mock archive backend on an ephemeral port; the handler maps each
/// request path to a canned response. Returns the bound address.
pub async fn start_mock_archive<F>(handler: F) -> SocketAddr
where
    F: Fn(String) -> Option<MockResponse> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        // Read until the end of the request headers.
                        let mut buf = Vec::with_capacity(1024);
                        let mut chunk = [0u8; 1024];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() > 8192 {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }
                        let request = String::from_utf8_lossy(&buf);
                        let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                        let Some(response) = handler(path) else {
                            // Simulated upstream failure: close without a response.
                            let _ = socket.shutdown().await;
                            return;
                        };

                        let status_text = match response.status {
                            200 => "200 OK",
                            302 => "302 Found",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let mut head = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status_text,
                            response.body.len()
                        );
                        for (name, value) in &response.headers {
                            head.push_str(&format!("{name}: {value}\r\n"));
                        }
                        head.push_str("\r\n");

                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&response.body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start the proxy against the given config on an ephemeral port.
pub async fn start_proxy(config: timeprox::ProxyConfig) -> (SocketAddr, timeprox::Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = timeprox::Shutdown::new();
    let rx = shutdown.subscribe();
    let server = timeprox::HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// A default config pointed at a mock archive backend.
pub fn test_config(archive_addr: SocketAddr) -> timeprox::ProxyConfig {
    let mut config = timeprox::ProxyConfig::default();
    config.archive.base_url = format!("http://{archive_addr}");
    config.archive.timestamp = "1998".to_string();
    config
}
