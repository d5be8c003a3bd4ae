//! # Courier WebSocket
//!
//! A WebSocket connection built from a [`courier_http::HttpConnection`],
//! inheriting its user agent and cache-control headers, with every sent and
//! received message written to a [`WebSocketLogger`].
//!
//! ## Features
//!
//! - Connection lifecycle mirrored from the transport ([`WebSocketState`])
//! - Whole-message receive with a growable buffer, or the legacy single
//!   fixed-size receive ([`ReceivePolicy`])
//! - Pluggable transport ([`WebSocketTransport`]); tokio-tungstenite by default
//!
//! ## Example
//!
//! ```rust,no_run
//! use courier_http::{HttpConnection, TracingHttpLogger, Url};
//! use courier_websocket::{CloseStatus, TracingWebSocketLogger, WebSocketConnection};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let origin = Url::parse("https://api.example.com")?;
//!     let http = HttpConnection::new(Arc::new(TracingHttpLogger), origin, false)?;
//!
//!     let mut socket = WebSocketConnection::new(Arc::new(TracingWebSocketLogger), &http);
//!     socket.connect("wss://api.example.com/stream").await?;
//!     socket.send("subscribe:ticker").await?;
//!     let reply = socket.receive().await?;
//!     println!("{}", reply);
//!     socket.close(CloseStatus::NormalClosure, "done").await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod connection;
mod error;
mod logger;
mod state;
pub mod timestamp;
mod transport;

pub use client::TungsteniteTransport;
pub use config::{
    DEFAULT_RECEIVE_BUFFER_SIZE, ReceivePolicy, TextEncoding, WebSocketConfig,
    WebSocketConfigBuilder,
};
pub use connection::WebSocketConnection;
pub use error::{WebSocketError, WebSocketResult};
pub use logger::{TracingWebSocketLogger, WebSocketLogger};
pub use state::{CloseStatus, MessageDirection, MessageType, WebSocketState};
pub use transport::{ReceiveResult, WebSocketTransport};
