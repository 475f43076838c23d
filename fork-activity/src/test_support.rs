//! In-process HTTP stub serving canned GitHub-style responses for tests.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned response, selected when `matches` appears in the request head.
pub(crate) struct StubRoute {
    pub matches: &'static str,
    pub body: String,
    pub next_link: Option<String>,
}

/// Serves `routes` on an ephemeral local port until the test ends.
///
/// The first route whose `matches` substring appears in the request head
/// wins, so more specific routes go first. `{addr}` in bodies and next links
/// is replaced with the actual listen address.
pub(crate) async fn spawn_stub_server(routes: Vec<StubRoute>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let Ok(n) = stream.read(&mut chunk).await else {
                    break;
                };
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }

            let head = String::from_utf8_lossy(&head).into_owned();
            let Some(route) = routes.iter().find(|route| head.contains(route.matches)) else {
                let _ = stream
                    .write_all(
                        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .await;
                continue;
            };

            let body = route.body.replace("{addr}", &addr.to_string());
            let mut response = String::from(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nConnection: close\r\n",
            );
            if let Some(link) = &route.next_link {
                let link = link.replace("{addr}", &addr.to_string());
                response.push_str(&format!("Link: <{link}>; rel=\"next\"\r\n"));
            }
            response.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));

            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    addr
}
