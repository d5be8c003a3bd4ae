//! Error types for WebSocket operations.

use crate::state::WebSocketState;
use thiserror::Error;

/// WebSocket error type.
#[derive(Error, Debug)]
pub enum WebSocketError {
    /// The opening handshake failed.
    #[error("Connection error: {0}")]
    Connect(#[source] tungstenite::Error),

    /// Writing a frame failed.
    #[error("Failed to send message: {0}")]
    Send(#[source] tungstenite::Error),

    /// Reading a frame failed.
    #[error("Failed to receive message: {0}")]
    Receive(#[source] tungstenite::Error),

    /// The closing handshake failed.
    #[error("Failed to close connection: {0}")]
    Close(#[source] tungstenite::Error),

    /// The operation is not allowed in the socket's current state.
    #[error("Cannot {operation} while the socket is {state}")]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// State the socket was in.
        state: WebSocketState,
    },

    /// An incoming message exceeded the configured limit.
    #[error("Message of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge {
        /// Bytes received so far.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid handshake header
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl WebSocketError {
    /// Check if the socket was in the wrong state for the operation.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if the error came from the transport.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connect(_) | Self::Send(_) | Self::Receive(_) | Self::Close(_)
        )
    }
}

/// Result type for WebSocket operations.
pub type WebSocketResult<T> = Result<T, WebSocketError>;
