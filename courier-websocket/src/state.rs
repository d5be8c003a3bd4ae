//! Socket state, close codes and message kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a WebSocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebSocketState {
    /// Not connected yet.
    None,
    /// Opening handshake in progress.
    Connecting,
    /// Open and ready for traffic.
    Open,
    /// We sent a close frame and wait for the peer's.
    CloseSent,
    /// The peer sent a close frame.
    CloseReceived,
    /// Closing handshake completed.
    Closed,
    /// Torn down without a closing handshake.
    Aborted,
}

impl WebSocketState {
    /// Check if the socket accepts data frames.
    pub fn is_open(&self) -> bool {
        *self == Self::Open
    }

    /// Check if the socket can no longer be used.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Aborted)
    }
}

impl fmt::Display for WebSocketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Kind of a received or sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// UTF-8 text message
    Text,
    /// Binary message
    Binary,
    /// Close frame
    Close,
}

/// Direction of a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    /// Handed to the socket.
    Sent,
    /// Read from the socket.
    Received,
}

impl fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("Sent"),
            Self::Received => f.write_str("Received"),
        }
    }
}

/// Close status codes (RFC 6455 section 7.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseStatus {
    /// 1000
    NormalClosure,
    /// 1001
    EndpointUnavailable,
    /// 1002
    ProtocolError,
    /// 1003
    InvalidMessageType,
    /// 1005
    Empty,
    /// 1007
    InvalidPayloadData,
    /// 1008
    PolicyViolation,
    /// 1009
    MessageTooBig,
    /// 1010
    MandatoryExtension,
    /// 1011
    InternalServerError,
    /// Any other code.
    Other(u16),
}

impl CloseStatus {
    /// Numeric close code.
    pub fn code(&self) -> u16 {
        match self {
            Self::NormalClosure => 1000,
            Self::EndpointUnavailable => 1001,
            Self::ProtocolError => 1002,
            Self::InvalidMessageType => 1003,
            Self::Empty => 1005,
            Self::InvalidPayloadData => 1007,
            Self::PolicyViolation => 1008,
            Self::MessageTooBig => 1009,
            Self::MandatoryExtension => 1010,
            Self::InternalServerError => 1011,
            Self::Other(code) => *code,
        }
    }
}

impl From<u16> for CloseStatus {
    fn from(code: u16) -> Self {
        match code {
            1000 => Self::NormalClosure,
            1001 => Self::EndpointUnavailable,
            1002 => Self::ProtocolError,
            1003 => Self::InvalidMessageType,
            1005 => Self::Empty,
            1007 => Self::InvalidPayloadData,
            1008 => Self::PolicyViolation,
            1009 => Self::MessageTooBig,
            1010 => Self::MandatoryExtension,
            1011 => Self::InternalServerError,
            other => Self::Other(other),
        }
    }
}
