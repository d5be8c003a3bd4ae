//! Default request headers owned by a connection.

use crate::Result;
use http::{HeaderMap, HeaderName, HeaderValue};
use parking_lot::RwLock;

/// Headers attached to every request a connection issues.
///
/// Seeded once at construction and mutable afterwards. Readers get
/// owned snapshots; the map itself never leaves the connection.
#[derive(Debug, Default)]
pub struct RequestHeaders {
    inner: RwLock<HeaderMap>,
}

impl RequestHeaders {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value as text.
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    }

    /// Insert or replace a header.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.inner.write().insert(name, value);
        Ok(())
    }

    /// Remove a header, returning its previous value.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.inner
            .write()
            .remove(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    }

    /// Check whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains_key(name)
    }

    /// Number of headers in the set.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy the current headers.
    pub fn snapshot(&self) -> HeaderMap {
        self.inner.read().clone()
    }
}
