//! # Courier HTTP
//!
//! An HTTP connection bound to a single origin, with cookie persistence,
//! default headers, JSON and form codecs, and a logging tap on every
//! response.
//!
//! ## Features
//!
//! - **Single origin**: relative paths resolve against a fixed base URL
//! - **Cookie jar**: cookies set by the server persist across requests and
//!   can be read or seeded in bulk
//! - **Default headers**: user agent, cache control and accept-language are
//!   installed once and stay editable
//! - **Response logging**: every fully read response is written to an
//!   [`HttpConnectionLogger`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier_http::{HttpConnection, TracingHttpLogger, Url};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let origin = Url::parse("https://api.example.com")?;
//!     let connection = HttpConnection::new(Arc::new(TracingHttpLogger), origin, false)?;
//!
//!     let body = connection
//!         .post_form("/login", &[("user", "alice"), ("pass", "secret")])
//!         .await?;
//!     println!("{}", body);
//!
//!     let cookies: HashMap<String, String> = connection.cookies();
//!     println!("session cookies: {:?}", cookies);
//!     Ok(())
//! }
//! ```

mod config;
mod connection;
mod cookie;
mod error;
mod headers;
mod logger;
mod record;

pub use config::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_CACHE_CONTROL, DEFAULT_USER_AGENT, HttpConnectionConfig,
    HttpConnectionConfigBuilder,
};
pub use connection::HttpConnection;
pub use cookie::CookieJar;
pub use error::{HttpError, Result};
pub use headers::RequestHeaders;
pub use logger::{HttpConnectionLogger, TracingHttpLogger};
pub use record::ResponseRecord;

// Re-export common types
pub use http::{HeaderMap, StatusCode, header};
pub use url::Url;
