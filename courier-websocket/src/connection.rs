//! WebSocket connection derived from an HTTP connection.

use bytes::Bytes;
use courier_http::HttpConnection;
use http::{HeaderMap, HeaderName, HeaderValue, header};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::client::TungsteniteTransport;
use crate::config::{ReceivePolicy, WebSocketConfig};
use crate::error::{WebSocketError, WebSocketResult};
use crate::logger::WebSocketLogger;
use crate::state::{CloseStatus, MessageDirection, MessageType, WebSocketState};
use crate::timestamp;
use crate::transport::WebSocketTransport;

/// Headers copied from the HTTP connection into the opening handshake.
const INHERITED_HEADERS: [HeaderName; 2] = [header::USER_AGENT, header::CACHE_CONTROL];

/// A persistent socket with message logging.
///
/// The handshake headers are copied from the HTTP connection once, at
/// construction; later changes to that connection do not propagate.
///
/// Operations take `&mut self`: one send or receive at a time per
/// connection.
pub struct WebSocketConnection<T: WebSocketTransport = TungsteniteTransport> {
    transport: T,
    logger: Arc<dyn WebSocketLogger>,
    headers: HeaderMap,
    config: WebSocketConfig,
    disposed: bool,
}

impl WebSocketConnection<TungsteniteTransport> {
    /// Create a connection that inherits headers from `http`.
    pub fn new(logger: Arc<dyn WebSocketLogger>, http: &HttpConnection) -> Self {
        Self::with_config(logger, http, WebSocketConfig::default())
    }

    /// Create a connection with a custom receive/encoding configuration.
    pub fn with_config(
        logger: Arc<dyn WebSocketLogger>,
        http: &HttpConnection,
        config: WebSocketConfig,
    ) -> Self {
        Self::with_transport(logger, http, TungsteniteTransport::new(), config)
    }
}

impl<T: WebSocketTransport> WebSocketConnection<T> {
    /// Create a connection on top of an arbitrary transport.
    pub fn with_transport(
        logger: Arc<dyn WebSocketLogger>,
        http: &HttpConnection,
        transport: T,
        config: WebSocketConfig,
    ) -> Self {
        let source = http.request_headers().snapshot();
        let mut headers = HeaderMap::new();
        for name in INHERITED_HEADERS {
            if let Some(value) = source.get(&name) {
                headers.insert(name, value.clone());
            }
        }

        Self {
            transport,
            logger,
            headers,
            config,
            disposed: false,
        }
    }

    /// Current socket state, as reported by the transport.
    pub fn state(&self) -> WebSocketState {
        self.transport.state()
    }

    /// Connection configuration.
    pub fn config(&self) -> &WebSocketConfig {
        &self.config
    }

    /// Headers sent with the opening handshake.
    pub fn request_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a handshake header. Only affects a later `connect`.
    pub fn set_request_header(&mut self, name: &str, value: &str) -> WebSocketResult<()> {
        let name =
            HeaderName::try_from(name).map_err(|e| WebSocketError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| WebSocketError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Close status and description sent by the peer, if any.
    pub fn close_status(&self) -> Option<(CloseStatus, String)> {
        self.transport.close_status()
    }

    /// Open the socket to `url`.
    pub async fn connect(&mut self, url: &str) -> WebSocketResult<()> {
        let url = Url::parse(url).map_err(|e| WebSocketError::InvalidUrl(e.to_string()))?;
        self.ensure_state("connect", &[WebSocketState::None])?;

        self.transport.connect(&url, &self.headers).await?;

        debug!(url = %url, state = %self.state(), "WebSocket connected");
        Ok(())
    }

    /// Send `payload` as one binary message.
    ///
    /// The `Sent` record is logged before the write is handed to the
    /// transport.
    pub async fn send(&mut self, payload: &str) -> WebSocketResult<()> {
        self.ensure_state("send", &[WebSocketState::Open])?;

        let bytes = self.config.send_encoding.encode(payload);
        self.logger.write_line(
            MessageDirection::Sent,
            payload,
            bytes.len(),
            timestamp::now(),
        );

        self.transport
            .send(Bytes::from(bytes), MessageType::Binary)
            .await
    }

    /// Receive one message as text.
    ///
    /// Trailing NUL characters are removed from the returned text. The
    /// logged copy is additionally percent-decoded, and its length is the
    /// UTF-16 length of the text before trimming.
    pub async fn receive(&mut self) -> WebSocketResult<String> {
        self.ensure_state("receive", &[WebSocketState::Open])?;

        let raw = match self.config.receive_policy {
            ReceivePolicy::SingleCall => self.receive_single().await?,
            ReceivePolicy::UntilEndOfMessage => self.receive_message().await?,
        };

        let text = raw.trim_end_matches('\0');
        let decoded = urlencoding::decode_binary(text.as_bytes());
        self.logger.write_line(
            MessageDirection::Received,
            &String::from_utf8_lossy(&decoded),
            raw.encode_utf16().count(),
            timestamp::now(),
        );

        Ok(text.to_string())
    }

    /// Close the socket with the given status.
    pub async fn close(&mut self, status: CloseStatus, description: &str) -> WebSocketResult<()> {
        self.ensure_state(
            "close",
            &[
                WebSocketState::Open,
                WebSocketState::CloseSent,
                WebSocketState::CloseReceived,
            ],
        )?;

        self.transport.close(status, description).await
    }

    /// Release the socket without a closing handshake.
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.transport.abort();
            self.disposed = true;
        }
    }

    /// The whole buffer is decoded, unused tail included.
    async fn receive_single(&mut self) -> WebSocketResult<String> {
        let mut buffer = vec![0u8; self.config.receive_buffer_size];
        self.transport.receive(&mut buffer).await?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    async fn receive_message(&mut self) -> WebSocketResult<String> {
        let mut buffer = vec![0u8; self.config.receive_buffer_size.max(1)];
        let mut message = Vec::new();
        let mut size = 0;

        loop {
            let result = self.transport.receive(&mut buffer).await?;
            size += result.count;

            // past the limit the rest of the message is read and dropped
            match self.config.max_message_size {
                Some(max) if size > max => message.clear(),
                _ => message.extend_from_slice(&buffer[..result.count]),
            }

            if result.end_of_message || result.message_type == MessageType::Close {
                break;
            }
        }

        if let Some(max) = self.config.max_message_size
            && size > max
        {
            debug!(size, max, "Discarded oversized WebSocket message");
            return Err(WebSocketError::MessageTooLarge { size, max });
        }

        Ok(String::from_utf8_lossy(&message).into_owned())
    }

    fn ensure_state(
        &self,
        operation: &'static str,
        allowed: &[WebSocketState],
    ) -> WebSocketResult<()> {
        let state = self.transport.state();
        if allowed.contains(&state) {
            Ok(())
        } else {
            Err(WebSocketError::InvalidState { operation, state })
        }
    }
}

impl<T: WebSocketTransport> Drop for WebSocketConnection<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
