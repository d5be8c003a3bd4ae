//! Default transport on top of tokio-tungstenite.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use http::HeaderMap;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};
use url::Url;

use crate::error::{WebSocketError, WebSocketResult};
use crate::state::{CloseStatus, MessageType, WebSocketState};
use crate::transport::{ReceiveResult, WebSocketTransport};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Message being handed out to the caller in chunks.
struct Pending {
    data: Bytes,
    offset: usize,
    message_type: MessageType,
}

/// WebSocket transport backed by tokio-tungstenite.
pub struct TungsteniteTransport {
    stream: Option<WsStream>,
    state: WebSocketState,
    pending: Option<Pending>,
    close_status: Option<(CloseStatus, String)>,
}

impl TungsteniteTransport {
    /// Create a transport in the `None` state.
    pub fn new() -> Self {
        Self {
            stream: None,
            state: WebSocketState::None,
            pending: None,
            close_status: None,
        }
    }

    fn record_close(&mut self, frame: Option<CloseFrame>) {
        self.close_status =
            frame.map(|f| (CloseStatus::from(u16::from(f.code)), f.reason.as_str().to_string()));
    }

    fn release(&mut self, state: WebSocketState) {
        self.stream = None;
        self.pending = None;
        self.state = state;
    }

    /// Read frames until a data message or close arrives.
    ///
    /// Returns `None` when the peer closed the socket.
    async fn next_message(&mut self) -> WebSocketResult<Option<Pending>> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(WebSocketError::InvalidState {
                operation: "receive",
                state: self.state,
            });
        };

        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(Pending {
                        data: Bytes::copy_from_slice(text.as_str().as_bytes()),
                        offset: 0,
                        message_type: MessageType::Text,
                    }));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(Pending {
                        data: Bytes::from(data),
                        offset: 0,
                        message_type: MessageType::Binary,
                    }));
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Close frame received");
                    self.record_close(frame);
                    self.state = if self.state == WebSocketState::CloseSent {
                        WebSocketState::Closed
                    } else {
                        WebSocketState::CloseReceived
                    };
                    return Ok(None);
                }
                // ping/pong replies are handled by tungstenite
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.release(WebSocketState::Aborted);
                    return Err(WebSocketError::Receive(e));
                }
                None => {
                    self.release(WebSocketState::Closed);
                    return Ok(None);
                }
            }
        }
    }
}

impl Default for TungsteniteTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebSocketTransport for TungsteniteTransport {
    fn state(&self) -> WebSocketState {
        self.state
    }

    async fn connect(&mut self, url: &Url, headers: &HeaderMap) -> WebSocketResult<()> {
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(WebSocketError::Connect)?;
        for (name, value) in headers {
            request.headers_mut().insert(name.clone(), value.clone());
        }

        self.state = WebSocketState::Connecting;

        match connect_async(request).await {
            Ok((stream, response)) => {
                debug!(url = %url, status = %response.status(), "WebSocket handshake completed");
                self.stream = Some(stream);
                self.state = WebSocketState::Open;
                Ok(())
            }
            Err(e) => {
                self.release(WebSocketState::Aborted);
                Err(WebSocketError::Connect(e))
            }
        }
    }

    async fn send(&mut self, payload: Bytes, message_type: MessageType) -> WebSocketResult<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(WebSocketError::InvalidState {
                operation: "send",
                state: self.state,
            });
        };

        let message = match message_type {
            MessageType::Binary => Message::binary(payload),
            MessageType::Text => Message::text(String::from_utf8_lossy(&payload).into_owned()),
            MessageType::Close => {
                return Err(WebSocketError::InvalidState {
                    operation: "send a close frame as data",
                    state: self.state,
                });
            }
        };

        trace!(payload_len = message.len(), "Writing WebSocket frame");

        if let Err(e) = stream.send(message).await {
            self.release(WebSocketState::Aborted);
            return Err(WebSocketError::Send(e));
        }
        Ok(())
    }

    async fn receive(&mut self, buffer: &mut [u8]) -> WebSocketResult<ReceiveResult> {
        if self.pending.is_none() {
            match self.next_message().await? {
                Some(message) => self.pending = Some(message),
                None => return Ok(ReceiveResult::close()),
            }
        }

        let Some(pending) = self.pending.as_mut() else {
            return Ok(ReceiveResult::close());
        };

        let remaining = &pending.data[pending.offset..];
        let count = remaining.len().min(buffer.len());
        buffer[..count].copy_from_slice(&remaining[..count]);
        pending.offset += count;

        let message_type = pending.message_type;
        let end_of_message = pending.offset >= pending.data.len();
        if end_of_message {
            self.pending = None;
        }

        Ok(ReceiveResult {
            count,
            message_type,
            end_of_message,
        })
    }

    async fn close(&mut self, status: CloseStatus, description: &str) -> WebSocketResult<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(WebSocketError::InvalidState {
                operation: "close",
                state: self.state,
            });
        };

        let frame = CloseFrame {
            code: CloseCode::from(status.code()),
            reason: description.to_string().into(),
        };

        match stream.close(Some(frame)).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => {}
            Err(e) => {
                self.release(WebSocketState::Aborted);
                return Err(WebSocketError::Close(e));
            }
        }

        if self.state != WebSocketState::CloseReceived {
            self.state = WebSocketState::CloseSent;

            // wait for the peer's close frame
            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Close(frame)) => {
                        self.record_close(frame);
                        break;
                    }
                    Ok(_) => continue,
                    Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => break,
                    Err(e) => {
                        self.release(WebSocketState::Aborted);
                        return Err(WebSocketError::Close(e));
                    }
                }
            }
        }

        debug!(code = status.code(), "WebSocket closed");
        self.release(WebSocketState::Closed);
        Ok(())
    }

    fn close_status(&self) -> Option<(CloseStatus, String)> {
        self.close_status.clone()
    }

    fn abort(&mut self) {
        let state = match self.state {
            WebSocketState::Closed | WebSocketState::Aborted => return,
            WebSocketState::None => WebSocketState::Closed,
            _ => WebSocketState::Aborted,
        };
        self.release(state);
    }
}
