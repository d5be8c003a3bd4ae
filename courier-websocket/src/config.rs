//! Receive and encoding policies for a WebSocket connection.

/// Default size of each receive buffer.
pub const DEFAULT_RECEIVE_BUFFER_SIZE: usize = 15000;

/// How a single `receive` call assembles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceivePolicy {
    /// One transport receive into a fixed buffer. Larger or fragmented
    /// messages come back truncated.
    SingleCall,
    /// Keep receiving until the transport reports end-of-message.
    #[default]
    UntilEndOfMessage,
}

/// Encoding applied to outgoing text payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// One byte per character; anything outside ASCII becomes `?`.
    #[default]
    Ascii,
    /// UTF-8.
    Utf8,
}

impl TextEncoding {
    /// Encode a payload.
    pub fn encode(&self, payload: &str) -> Vec<u8> {
        match self {
            Self::Ascii => {
                let mut bytes = Vec::with_capacity(payload.len());
                for c in payload.chars() {
                    if c.is_ascii() {
                        bytes.push(c as u8);
                    } else {
                        // one '?' per UTF-16 unit
                        bytes.extend(std::iter::repeat_n(b'?', c.len_utf16()));
                    }
                }
                bytes
            }
            Self::Utf8 => payload.as_bytes().to_vec(),
        }
    }
}

/// WebSocket connection configuration.
#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    /// Size of the buffer handed to each transport receive.
    pub receive_buffer_size: usize,
    /// How messages are assembled on receive.
    pub receive_policy: ReceivePolicy,
    /// Encoding for outgoing payloads.
    pub send_encoding: TextEncoding,
    /// Upper bound for an assembled message.
    pub max_message_size: Option<usize>,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            receive_buffer_size: DEFAULT_RECEIVE_BUFFER_SIZE,
            receive_policy: ReceivePolicy::default(),
            send_encoding: TextEncoding::default(),
            max_message_size: None,
        }
    }
}

impl WebSocketConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WebSocketConfigBuilder {
        WebSocketConfigBuilder::default()
    }
}

/// Builder for WebSocket configuration.
#[derive(Debug, Default)]
pub struct WebSocketConfigBuilder {
    config: WebSocketConfig,
}

impl WebSocketConfigBuilder {
    /// Set the receive buffer size. Zero is raised to one.
    pub fn receive_buffer_size(mut self, size: usize) -> Self {
        self.config.receive_buffer_size = size.max(1);
        self
    }

    /// Set the receive policy.
    pub fn receive_policy(mut self, policy: ReceivePolicy) -> Self {
        self.config.receive_policy = policy;
        self
    }

    /// Set the encoding for outgoing payloads.
    pub fn send_encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.send_encoding = encoding;
        self
    }

    /// Set the maximum assembled message size.
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = Some(size);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> WebSocketConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_encoding() {
        assert_eq!(TextEncoding::Ascii.encode("abc"), b"abc");
        assert_eq!(TextEncoding::Ascii.encode("caf\u{e9}"), b"caf?");
        assert_eq!(TextEncoding::Ascii.encode("\u{1F600}"), b"??");
    }

    #[test]
    fn test_utf8_encoding() {
        assert_eq!(TextEncoding::Utf8.encode("caf\u{e9}"), "caf\u{e9}".as_bytes());
    }

    #[test]
    fn test_config_defaults() {
        let config = WebSocketConfig::default();
        assert_eq!(config.receive_buffer_size, 15000);
        assert_eq!(config.receive_policy, ReceivePolicy::UntilEndOfMessage);
        assert_eq!(config.send_encoding, TextEncoding::Ascii);
        assert!(config.max_message_size.is_none());
    }

    #[test]
    fn test_builder_clamps_buffer_size() {
        let config = WebSocketConfig::builder()
            .receive_buffer_size(0)
            .receive_policy(ReceivePolicy::SingleCall)
            .build();
        assert_eq!(config.receive_buffer_size, 1);
        assert_eq!(config.receive_policy, ReceivePolicy::SingleCall);
    }
}
