//! HTTP logger capability.

/// Sink for HTTP log records.
///
/// Called once for every response whose body is fully read by the
/// connection.
pub trait HttpConnectionLogger: Send + Sync {
    /// Write a message without a line terminator.
    fn write(&self, message: &str);

    /// Write a message as a complete line.
    fn write_line(&self, message: &str);
}

/// Logger that forwards HTTP records to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingHttpLogger;

impl HttpConnectionLogger for TracingHttpLogger {
    fn write(&self, message: &str) {
        tracing::debug!(target: "courier::http", record = %message, "HTTP response");
    }

    fn write_line(&self, message: &str) {
        tracing::info!(target: "courier::http", record = %message, "HTTP response");
    }
}
