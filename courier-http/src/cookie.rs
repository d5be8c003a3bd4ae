//! Per-origin cookie jar.
//!
//! The jar is shared with the reqwest client as its cookie provider, so
//! `Set-Cookie` headers are stored as responses are processed and every
//! read reflects the transport's current state.

use reqwest::cookie::{CookieStore, Jar};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Cookie name/value store scoped to one origin.
#[derive(Debug, Clone)]
pub struct CookieJar {
    store: Arc<Jar>,
    origin: Url,
}

impl CookieJar {
    /// Create an empty jar for the given origin.
    pub fn new(origin: Url) -> Self {
        Self {
            store: Arc::new(Jar::default()),
            origin,
        }
    }

    /// The underlying store handed to the transport.
    pub(crate) fn store(&self) -> Arc<Jar> {
        Arc::clone(&self.store)
    }

    /// Read every cookie the transport holds for the origin.
    ///
    /// Each `name=value` pair is split on `=`; the value is the segment
    /// following the first `=` up to the next one, so values containing
    /// `=` come back truncated.
    pub fn get(&self) -> HashMap<String, String> {
        let mut cookies = HashMap::new();

        let Some(header) = self.store.cookies(&self.origin) else {
            return cookies;
        };
        let Ok(header) = header.to_str() else {
            tracing::warn!(origin = %self.origin, "Cookie header is not valid UTF-8");
            return cookies;
        };

        for pair in header.split("; ") {
            let mut parts = pair.split('=');
            let name = parts.next().unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let value = parts.next().unwrap_or_default();
            cookies.insert(name.to_string(), value.to_string());
        }

        cookies
    }

    /// Store the given cookies for the origin.
    ///
    /// Entries are joined into a single comma-separated `name=value` header
    /// and handed to [`CookieJar::set_header`]. Existing cookies with other
    /// names are kept.
    pub fn set(&self, cookies: &HashMap<String, String>) {
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(",");

        self.set_header(&header);
    }

    /// Store every cookie of a comma-separated cookie header for the origin.
    pub fn set_header(&self, header: &str) {
        for cookie in header.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            self.store.add_cookie_str(cookie, &self.origin);
        }
        tracing::trace!(origin = %self.origin, "Cookies updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar() -> CookieJar {
        CookieJar::new(Url::parse("https://api.example.com").unwrap())
    }

    #[test]
    fn test_empty_jar() {
        assert!(jar().get().is_empty());
    }

    #[test]
    fn test_cookie_round_trip() {
        let jar = jar();
        let cookies: HashMap<String, String> = [
            ("session".to_string(), "abc123".to_string()),
            ("theme".to_string(), "dark".to_string()),
        ]
        .into_iter()
        .collect();

        jar.set(&cookies);
        assert_eq!(jar.get(), cookies);
    }

    #[test]
    fn test_set_keeps_other_cookies() {
        let jar = jar();
        jar.set_header("a=1");
        jar.set_header("b=2,a=3");

        let cookies = jar.get();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "3");
        assert_eq!(cookies["b"], "2");
    }

    #[test]
    fn test_value_with_equals_is_truncated() {
        let jar = jar();
        jar.set_header("token=abc=def");

        assert_eq!(jar.get()["token"], "abc");
    }

    #[test]
    fn test_jar_is_scoped_to_origin() {
        let jar = jar();
        jar.set_header("a=1");

        let other = CookieJar {
            store: jar.store(),
            origin: Url::parse("https://other.example.com").unwrap(),
        };
        assert!(other.get().is_empty());
    }
}
