//! Transport seam for WebSocket I/O.

use crate::error::WebSocketResult;
use crate::state::{CloseStatus, MessageType, WebSocketState};
use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use url::Url;

/// Outcome of one transport receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveResult {
    /// Bytes written into the caller's buffer.
    pub count: usize,
    /// Kind of the message being read.
    pub message_type: MessageType,
    /// Whether this call delivered the last bytes of the message.
    pub end_of_message: bool,
}

impl ReceiveResult {
    /// Result reported when the peer closed the socket.
    pub fn close() -> Self {
        Self {
            count: 0,
            message_type: MessageType::Close,
            end_of_message: true,
        }
    }
}

/// Socket implementation a [`WebSocketConnection`](crate::WebSocketConnection)
/// delegates to.
///
/// Implementations own the state machine; the connection only reads it.
/// Receives copy into a caller-supplied buffer and may deliver one message
/// across several calls.
#[async_trait]
pub trait WebSocketTransport: Send {
    /// Current state.
    fn state(&self) -> WebSocketState;

    /// Perform the opening handshake with the given extra headers.
    async fn connect(&mut self, url: &Url, headers: &HeaderMap) -> WebSocketResult<()>;

    /// Write one complete message.
    async fn send(&mut self, payload: Bytes, message_type: MessageType) -> WebSocketResult<()>;

    /// Read the next chunk of the current message into `buffer`.
    async fn receive(&mut self, buffer: &mut [u8]) -> WebSocketResult<ReceiveResult>;

    /// Perform the closing handshake.
    async fn close(&mut self, status: CloseStatus, description: &str) -> WebSocketResult<()>;

    /// Close status and description sent by the peer, if any.
    fn close_status(&self) -> Option<(CloseStatus, String)> {
        None
    }

    /// Drop the socket without a closing handshake. Must be idempotent.
    fn abort(&mut self);
}
