// Courier - client-side HTTP and WebSocket connections for Rust
//
// This library bundles an HTTP connection that owns a cookie jar and a set of
// default headers with a WebSocket connection built from it.

/// HTTP connection, cookie jar, default headers and response logging.
pub use courier_http as http;

/// WebSocket connection, transport and message logging.
pub use courier_websocket as websocket;

pub use courier_http::{
    CookieJar, HttpConnection, HttpConnectionConfig, HttpConnectionLogger, HttpError,
    RequestHeaders, ResponseRecord, TracingHttpLogger,
};
pub use courier_websocket::{
    CloseStatus, MessageDirection, TracingWebSocketLogger, WebSocketConfig, WebSocketConnection,
    WebSocketError, WebSocketLogger, WebSocketState,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CloseStatus,
        CookieJar,
        HttpConnection,
        HttpConnectionConfig,
        HttpConnectionLogger,
        HttpError,
        MessageDirection,
        RequestHeaders,
        TracingHttpLogger,
        TracingWebSocketLogger,
        WebSocketConfig,
        WebSocketConnection,
        WebSocketError,
        WebSocketLogger,
        WebSocketState,
    };
    pub use courier_http::Url;
    pub use courier_websocket::ReceivePolicy;
}
