//! WebSocket logger capability.

use crate::state::MessageDirection;

/// Sink for WebSocket message records.
///
/// Called once per sent or received message with the payload, its length
/// in bytes and a millisecond timestamp.
pub trait WebSocketLogger: Send + Sync {
    /// Write a record without a line terminator.
    fn write(&self, direction: MessageDirection, data: &str, length: usize, timestamp: i64);

    /// Write a record as a complete line.
    fn write_line(&self, direction: MessageDirection, data: &str, length: usize, timestamp: i64);
}

/// Logger that forwards WebSocket records to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingWebSocketLogger;

impl WebSocketLogger for TracingWebSocketLogger {
    fn write(&self, direction: MessageDirection, data: &str, length: usize, timestamp: i64) {
        tracing::debug!(
            target: "courier::websocket",
            direction = %direction,
            length,
            timestamp,
            data,
            "WebSocket message"
        );
    }

    fn write_line(&self, direction: MessageDirection, data: &str, length: usize, timestamp: i64) {
        tracing::info!(
            target: "courier::websocket",
            direction = %direction,
            length,
            timestamp,
            data,
            "WebSocket message"
        );
    }
}
