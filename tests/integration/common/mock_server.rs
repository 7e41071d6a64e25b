use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Generic mock user service that answers every request with a fixed HTTP
/// response and optionally counts incoming requests.
///
/// Returns the users collection URL and a shutdown handle.
fn spawn_mock_tcp_server(
    response: &'static str,
    hits: Option<Arc<AtomicUsize>>,
) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    let listener = tokio::net::TcpListener::from_std(listener).unwrap();

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    if let Ok((mut stream, _)) = result {
                        let hits = hits.clone();
                        tokio::spawn(async move {
                            let mut buf = [0u8; 4096];
                            let _ = stream.read(&mut buf).await;
                            if let Some(hits) = hits {
                                hits.fetch_add(1, Ordering::SeqCst);
                            }
                            let _ = stream.write_all(response.as_bytes()).await;
                        });
                    }
                }
                _ = &mut shutdown_rx => break,
            }
        }
    });

    (format!("http://{}/users", addr), shutdown_tx)
}

/// User service that knows every user.
pub fn spawn_user_found_server(hits: Arc<AtomicUsize>) -> (String, tokio::sync::oneshot::Sender<()>) {
    spawn_mock_tcp_server(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}",
        Some(hits),
    )
}

/// User service that knows no user.
pub fn spawn_user_missing_server() -> (String, tokio::sync::oneshot::Sender<()>) {
    spawn_mock_tcp_server(
        "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: 28\r\n\r\n{\"error\":\"user not found\"}\r\n",
        None,
    )
}

/// User service failing internally.
pub fn spawn_500_server() -> (String, tokio::sync::oneshot::Sender<()>) {
    spawn_mock_tcp_server(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n",
        None,
    )
}

/// Another success code that is still not an exact 200.
pub fn spawn_204_server() -> (String, tokio::sync::oneshot::Sender<()>) {
    spawn_mock_tcp_server("HTTP/1.1 204 No Content\r\n\r\n", None)
}

/// Redirects elsewhere; the redirect must not be followed.
pub fn spawn_302_redirect_server() -> (String, tokio::sync::oneshot::Sender<()>) {
    spawn_mock_tcp_server(
        "HTTP/1.1 302 Found\r\nLocation: http://127.0.0.1:1/users/1\r\nContent-Length: 0\r\n\r\n",
        None,
    )
}

/// Accepts connections and never answers.
pub fn spawn_silent_server() -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    let listener = tokio::net::TcpListener::from_std(listener).unwrap();

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    if let Ok((mut stream, _)) = result {
                        tokio::spawn(async move {
                            let mut buf = [0u8; 4096];
                            let _ = stream.read(&mut buf).await;
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        });
                    }
                }
                _ = &mut shutdown_rx => break,
            }
        }
    });

    (format!("http://{}/users", addr), shutdown_tx)
}

/// Users collection URL on a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/users", addr)
}

/// Spawn a user service that captures the request line of the first request
/// and answers 200 OK.
pub fn spawn_request_line_capture_server() -> (
    String,
    tokio::sync::oneshot::Receiver<String>,
    tokio::sync::oneshot::Sender<()>,
) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    let listener = tokio::net::TcpListener::from_std(listener).unwrap();

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let (line_tx, line_rx) = tokio::sync::oneshot::channel::<String>();
    let line_tx = Arc::new(tokio::sync::Mutex::new(Some(line_tx)));

    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    if let Ok((mut stream, _)) = result {
                        let line_tx = line_tx.clone();
                        tokio::spawn(async move {
                            let mut data = Vec::new();
                            let mut buf = [0u8; 4096];
                            loop {
                                let read = stream.read(&mut buf).await.unwrap_or(0);
                                if read == 0 {
                                    break;
                                }
                                data.extend_from_slice(&buf[..read]);
                                if data.windows(4).any(|w| w == b"\r\n\r\n") {
                                    break;
                                }
                            }

                            let text = String::from_utf8_lossy(&data);
                            let request_line = text.lines().next().unwrap_or("").to_string();
                            if let Some(tx) = line_tx.lock().await.take() {
                                let _ = tx.send(request_line);
                            }

                            let response = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
                            let _ = stream.write_all(response.as_bytes()).await;
                        });
                    }
                }
                _ = &mut shutdown_rx => break,
            }
        }
    });

    (format!("http://{}/users", addr), line_rx, shutdown_tx)
}
