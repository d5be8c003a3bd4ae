//! Integration tests for courier-websocket against a local tokio-tungstenite server.

use courier_http::{HttpConnection, TracingHttpLogger, Url};
use courier_websocket::*;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

#[derive(Default)]
struct RecordingLogger {
    records: Mutex<Vec<(MessageDirection, String, usize)>>,
}

impl WebSocketLogger for RecordingLogger {
    fn write(&self, direction: MessageDirection, data: &str, length: usize, timestamp: i64) {
        self.write_line(direction, data, length, timestamp);
    }

    fn write_line(&self, direction: MessageDirection, data: &str, length: usize, _: i64) {
        self.records
            .lock()
            .push((direction, data.to_string(), length));
    }
}

/// Accept one client, report its user agent and echo data frames back.
async fn spawn_echo_server() -> (String, oneshot::Receiver<Option<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (agent_tx, agent_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let agent = request
                .headers()
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let _ = agent_tx.send(agent);
            Ok(response)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        while let Some(message) = ws.next().await {
            match message {
                Ok(message) if message.is_binary() || message.is_text() => {
                    if ws.send(message).await.is_err() {
                        break;
                    }
                }
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    });

    (format!("ws://{}/socket", addr), agent_rx)
}

fn http() -> HttpConnection {
    HttpConnection::new(
        Arc::new(TracingHttpLogger),
        Url::parse("http://127.0.0.1").unwrap(),
        false,
    )
    .unwrap()
}

#[tokio::test]
async fn test_echo_round_trip() {
    let (url, agent_rx) = spawn_echo_server().await;
    let http = http();
    http.request_headers().set("user-agent", "courier-tests").unwrap();

    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::new(logger.clone(), &http);
    assert_eq!(socket.state(), WebSocketState::None);

    socket.connect(&url).await.unwrap();
    assert_eq!(socket.state(), WebSocketState::Open);
    assert_eq!(agent_rx.await.unwrap().as_deref(), Some("courier-tests"));

    socket.send("hello%20world").await.unwrap();
    let reply = socket.receive().await.unwrap();
    assert_eq!(reply, "hello%20world");

    socket
        .close(CloseStatus::NormalClosure, "done")
        .await
        .unwrap();
    assert_eq!(socket.state(), WebSocketState::Closed);
    assert_eq!(
        socket.close_status().map(|(status, _)| status),
        Some(CloseStatus::NormalClosure)
    );

    let records = logger.records.lock().clone();
    assert_eq!(
        records,
        vec![
            (MessageDirection::Sent, "hello%20world".to_string(), 13),
            (MessageDirection::Received, "hello world".to_string(), 13),
        ]
    );
}

#[tokio::test]
async fn test_large_message_is_received_whole() {
    let (url, _agent_rx) = spawn_echo_server().await;
    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::new(logger, &http());
    socket.connect(&url).await.unwrap();

    let payload = "x".repeat(40_000);
    socket.send(&payload).await.unwrap();

    assert_eq!(socket.receive().await.unwrap().len(), 40_000);
}

#[tokio::test]
async fn test_single_call_policy_truncates_large_message() {
    let (url, _agent_rx) = spawn_echo_server().await;
    let config = WebSocketConfig::builder()
        .receive_policy(ReceivePolicy::SingleCall)
        .build();
    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::with_config(logger, &http(), config);
    socket.connect(&url).await.unwrap();

    socket.send(&"y".repeat(20_000)).await.unwrap();

    assert_eq!(socket.receive().await.unwrap().len(), DEFAULT_RECEIVE_BUFFER_SIZE);
}

#[tokio::test]
async fn test_oversized_message_does_not_leak_into_next_receive() {
    let (url, _agent_rx) = spawn_echo_server().await;
    let config = WebSocketConfig::builder().max_message_size(20_000).build();
    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::with_config(logger, &http(), config);
    socket.connect(&url).await.unwrap();

    socket.send(&"x".repeat(40_000)).await.unwrap();
    let err = socket.receive().await.unwrap_err();
    assert!(matches!(
        err,
        WebSocketError::MessageTooLarge { size: 40_000, max: 20_000 }
    ));
    assert_eq!(socket.state(), WebSocketState::Open);

    socket.send("next").await.unwrap();
    assert_eq!(socket.receive().await.unwrap(), "next");
}

#[tokio::test]
async fn test_close_after_close_is_state_error() {
    let (url, _agent_rx) = spawn_echo_server().await;
    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::new(logger, &http());
    socket.connect(&url).await.unwrap();

    socket
        .close(CloseStatus::NormalClosure, "first")
        .await
        .unwrap();
    let err = socket
        .close(CloseStatus::NormalClosure, "second")
        .await
        .unwrap_err();
    assert!(err.is_state_error());
}

#[tokio::test]
async fn test_connect_failure() {
    let logger = Arc::new(RecordingLogger::default());
    let mut socket = WebSocketConnection::new(logger.clone(), &http());

    let err = socket.connect("ws://127.0.0.1:1/").await.unwrap_err();
    assert!(err.is_transport());
    assert!(logger.records.lock().is_empty());
}
