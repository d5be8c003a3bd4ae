//! HTTP connection error types.

use thiserror::Error;

/// Result type for HTTP connection operations.
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP connection errors.
///
/// Non-2xx responses are not errors: their body is returned to the caller
/// unchanged. Only failures of the transport itself surface as
/// [`HttpError::Transport`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport failed to establish the connection or read the response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not decode into the requested type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// A relative path could not be resolved against the origin.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl HttpError {
    /// Check if this error came from the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a JSON decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}

impl From<serde_urlencoded::ser::Error> for HttpError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for HttpError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for HttpError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}
