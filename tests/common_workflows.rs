//! Integration tests for common Courier workflows.
//!
//! These tests drive an HTTP connection against a mock server and build a
//! WebSocket connection from it.

use courier::prelude::*;
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::Arc;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl HttpConnectionLogger for RecordingLogger {
    fn write(&self, data: &str) {
        self.lines.lock().push(data.to_string());
    }

    fn write_line(&self, data: &str) {
        self.lines.lock().push(data.to_string());
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn connect(server: &MockServer) -> (HttpConnection, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let origin = Url::parse(&server.uri()).unwrap();
    let connection = HttpConnection::new(logger.clone(), origin, false).unwrap();
    (connection, logger)
}

// =============================================================================
// HTTP Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_login_form_then_session_cookie() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=a&pass=b"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=s1; Path=/")
                .set_body_string("welcome"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("cookie", "session=s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"a"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (connection, logger) = connect(&server).await;

    let body = connection
        .post_form("/login", &[("user", "a"), ("pass", "b")][..])
        .await
        .unwrap();
    assert_eq!(body, "welcome");
    assert_eq!(logger.lines.lock().len(), 1);
    assert_eq!(connection.cookies()["session"], "s1");

    #[derive(Deserialize)]
    struct Me {
        name: String,
    }

    let me: Me = connection.get_json("/me").await.unwrap();
    assert_eq!(me.name, "a");
    assert_eq!(logger.lines.lock().len(), 2);
}

#[tokio::test]
async fn test_default_headers_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("cache-control", "no-cache"))
        .and(header("accept-language", "en-US,en;q=0.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let (connection, _) = connect(&server).await;
    assert_eq!(connection.get_string("/").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_log_line_is_json_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let (connection, logger) = connect(&server).await;
    assert_eq!(connection.get_string("/status").await.unwrap(), "down");

    let line = logger.lines.lock()[0].clone();
    let record: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(record["status"], 503);
}

// =============================================================================
// WebSocket Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_websocket_inherits_http_headers() {
    let server = MockServer::start().await;
    let (connection, _) = connect(&server).await;
    connection
        .request_headers()
        .set("user-agent", "courier-workflow")
        .unwrap();
    connection.request_headers().set("x-other", "1").unwrap();

    let socket = WebSocketConnection::new(Arc::new(TracingWebSocketLogger), &connection);

    let headers = socket.request_headers();
    assert_eq!(headers["user-agent"], "courier-workflow");
    assert_eq!(headers["cache-control"], "no-cache");
    assert!(headers.get("x-other").is_none());
    assert_eq!(socket.state(), WebSocketState::None);
}

#[tokio::test]
async fn test_websocket_send_before_connect_is_state_error() {
    let server = MockServer::start().await;
    let (connection, _) = connect(&server).await;

    let mut socket = WebSocketConnection::new(Arc::new(TracingWebSocketLogger), &connection);

    let err = socket.send("hello").await.unwrap_err();
    assert!(err.is_state_error());

    let err = socket.receive().await.unwrap_err();
    assert!(err.is_state_error());
}
