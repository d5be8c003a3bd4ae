//! HTTP connection configuration.

use url::Url;

/// User agent installed on every new connection.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.159 Safari/537.36";

/// Cache-Control value installed on every new connection.
pub const DEFAULT_CACHE_CONTROL: &str = "no-cache";

/// Accept-Language value installed on every new connection.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// HTTP connection configuration.
#[derive(Debug, Clone)]
pub struct HttpConnectionConfig {
    /// Origin every relative path is resolved against.
    pub origin: Url,
    /// Skip TLS certificate validation. Local and test environments only.
    pub ignore_tls_errors: bool,
    /// Initial `User-Agent` header.
    pub user_agent: String,
    /// Initial `Cache-Control` header.
    pub cache_control: String,
    /// Initial `accept-language` header.
    pub accept_language: String,
    /// Follow redirects.
    pub follow_redirects: bool,
}

impl HttpConnectionConfig {
    /// Create a configuration for the given origin with default headers.
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            ignore_tls_errors: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            follow_redirects: true,
        }
    }

    /// Create a new configuration builder.
    pub fn builder(origin: Url) -> HttpConnectionConfigBuilder {
        HttpConnectionConfigBuilder {
            config: Self::new(origin),
        }
    }
}

/// Builder for HTTP connection configuration.
#[derive(Debug)]
pub struct HttpConnectionConfigBuilder {
    config: HttpConnectionConfig,
}

impl HttpConnectionConfigBuilder {
    /// Skip TLS certificate validation.
    pub fn ignore_tls_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_tls_errors = ignore;
        self
    }

    /// Set the initial user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the initial cache-control value.
    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.config.cache_control = value.into();
        self
    }

    /// Set the initial accept-language value.
    pub fn accept_language(mut self, value: impl Into<String>) -> Self {
        self.config.accept_language = value.into();
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirects(mut self, enable: bool) -> Self {
        self.config.follow_redirects = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpConnectionConfig {
        self.config
    }
}
