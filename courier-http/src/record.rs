//! Serializable snapshot of a response, written to the HTTP logger.

use http::{HeaderMap, StatusCode, Version};
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Status line and headers of a received response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    /// Numeric status code.
    pub status: u16,
    /// Canonical reason phrase, if the status has one.
    pub reason: Option<&'static str>,
    /// HTTP version of the response.
    pub version: String,
    /// Final URL after redirects.
    pub url: String,
    /// Response headers. Repeated headers keep every value.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl ResponseRecord {
    /// Capture the parts of a response worth logging.
    pub fn new(status: StatusCode, version: Version, url: &Url, headers: &HeaderMap) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            map.entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        Self {
            status: status.as_u16(),
            reason: status.canonical_reason(),
            version: format!("{:?}", version),
            url: url.to_string(),
            headers: map,
        }
    }

    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        Self::new(
            response.status(),
            response.version(),
            response.url(),
            response.headers(),
        )
    }

    /// Render the record as a single JSON line.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to serialize response record");
            format!("{} {}", self.status, self.url)
        })
    }
}
