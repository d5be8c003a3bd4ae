//! HTTP connection implementation.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use http::{Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::{
    CookieJar, HttpConnectionConfig, HttpConnectionLogger, HttpError, RequestHeaders,
    ResponseRecord, Result,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP connection bound to a single origin.
///
/// Owns the cookie jar and the default header set. Every operation that
/// reads a full response body writes one record to the logger.
pub struct HttpConnection {
    inner: reqwest::Client,
    origin: Url,
    headers: RequestHeaders,
    cookies: CookieJar,
    logger: Arc<dyn HttpConnectionLogger>,
}

impl HttpConnection {
    /// Create a connection to `origin` with the default headers.
    ///
    /// `ignore_tls_errors` disables all certificate validation and is meant
    /// for local environments only.
    pub fn new(
        logger: Arc<dyn HttpConnectionLogger>,
        origin: Url,
        ignore_tls_errors: bool,
    ) -> Result<Self> {
        let config = HttpConnectionConfig::builder(origin)
            .ignore_tls_errors(ignore_tls_errors)
            .build();
        Self::with_config(logger, config)
    }

    /// Create a connection from a full configuration.
    pub fn with_config(
        logger: Arc<dyn HttpConnectionLogger>,
        config: HttpConnectionConfig,
    ) -> Result<Self> {
        let cookies = CookieJar::new(config.origin.clone());

        let mut builder = reqwest::Client::builder().cookie_provider(cookies.store());

        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::default());
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        if config.ignore_tls_errors {
            warn!(origin = %config.origin, "TLS certificate validation disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder.build()?;

        let headers = RequestHeaders::new();
        headers.set(header::USER_AGENT.as_str(), &config.user_agent)?;
        headers.set(header::CACHE_CONTROL.as_str(), &config.cache_control)?;
        headers.set(header::ACCEPT_LANGUAGE.as_str(), &config.accept_language)?;

        Ok(Self {
            inner,
            origin: config.origin,
            headers,
            cookies,
            logger,
        })
    }

    /// The origin all relative paths resolve against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// The default headers sent with every request.
    pub fn request_headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// The cookie jar for the origin.
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookies
    }

    /// Read all cookies currently held for the origin.
    pub fn cookies(&self) -> HashMap<String, String> {
        self.cookies.get()
    }

    /// Store cookies for the origin.
    pub fn set_cookies(&self, cookies: &HashMap<String, String>) {
        self.cookies.set(cookies)
    }

    /// Resolve a relative path against the origin.
    pub fn resolve(&self, relative: &str) -> Result<Url> {
        Ok(self.origin.join(relative)?)
    }

    /// GET `relative` and return the body as text.
    ///
    /// Non-2xx bodies are returned as-is. The resolved URL becomes the
    /// `Referer` of subsequent requests.
    pub async fn get_string(&self, relative: &str) -> Result<String> {
        let url = self.resolve(relative)?;
        let response = self.send(Method::GET, url.clone(), None).await?;
        let body = self.read_logged(response).await?;

        self.headers.set(header::REFERER.as_str(), url.as_str())?;

        Ok(body)
    }

    /// GET `relative` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T> {
        let body = self.get_string(relative).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `relative` and stream the body.
    ///
    /// The response is not logged since the body is never read here.
    pub async fn get_stream(
        &self,
        relative: &str,
    ) -> Result<BoxStream<'static, Result<Bytes>>> {
        let url = self.resolve(relative)?;
        let response = self.send(Method::GET, url, None).await?;
        Ok(response.bytes_stream().map_err(HttpError::from).boxed())
    }

    /// POST `form` as `application/x-www-form-urlencoded` and return the body.
    pub async fn post_form<F>(&self, relative: &str, form: &F) -> Result<String>
    where
        F: Serialize + ?Sized,
    {
        let encoded = serde_urlencoded::to_string(form)?;
        let url = self.resolve(relative)?;
        let response = self
            .send(Method::POST, url, Some((FORM_CONTENT_TYPE, encoded.into_bytes())))
            .await?;
        self.read_logged(response).await
    }

    /// POST `form` and decode the response body as JSON.
    pub async fn post_form_as<F, R>(&self, relative: &str, form: &F) -> Result<R>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.post_form(relative, form).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST `body` serialized as JSON and return the response body.
    pub async fn post_json<S>(&self, relative: &str, body: &S) -> Result<String>
    where
        S: Serialize + ?Sized,
    {
        let json = serde_json::to_vec(body).map_err(|e| HttpError::Encode(e.to_string()))?;
        let url = self.resolve(relative)?;
        let response = self
            .send(Method::POST, url, Some((JSON_CONTENT_TYPE, json)))
            .await?;
        self.read_logged(response).await
    }

    /// POST `body` as JSON and decode the response body as JSON.
    pub async fn post_json_as<S, R>(&self, relative: &str, body: &S) -> Result<R>
    where
        S: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.post_json(relative, body).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<(&'static str, Vec<u8>)>,
    ) -> Result<reqwest::Response> {
        debug!(method = %method, url = %url, "Sending HTTP request");

        let mut request = self
            .inner
            .request(method, url)
            .headers(self.headers.snapshot());

        if let Some((content_type, bytes)) = body {
            request = request.header(header::CONTENT_TYPE, content_type).body(bytes);
        }

        let response = request.send().await?;

        debug!(
            status = %response.status(),
            url = %response.url(),
            "Received HTTP response"
        );

        Ok(response)
    }

    async fn read_logged(&self, response: reqwest::Response) -> Result<String> {
        let record = ResponseRecord::from_response(&response);
        let body = response.text().await?;
        self.logger.write_line(&record.to_line());
        Ok(body)
    }
}

impl std::fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("origin", &self.origin.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
