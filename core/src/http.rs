//! Request options and the raw response handle.
//!
//! # Design
//! `RequestOptions` describes one call as plain data: method, headers, an
//! optional body, and per-call overrides for the timeout and base address.
//! The verb helpers on `RequestClient` fill in the method and, for JSON
//! bodies, the content type. `RawResponse` wraps the transport response
//! without reading its body.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::RequestError;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Per-call options. Unset `timeout` and `base_url` fall back to the
/// client's `ClientConfig`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub base_url: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Header lookup by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Turn these options into a JSON-body request: sets the method and body
    /// and adds `Content-Type: application/json` unless the caller already
    /// supplied a content type.
    pub(crate) fn into_json(mut self, method: HttpMethod, body: String) -> Self {
        self.method = method;
        self.body = Some(body);
        if self.header(CONTENT_TYPE).is_none() {
            self.headers
                .insert(0, (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        }
        self
    }
}

/// True when `url` carries its own `http://` or `https://` scheme.
pub fn is_absolute_url(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Absolute URLs are used verbatim; anything else is appended to `base_url`.
pub fn resolve_url(url: &str, base_url: &str) -> String {
    if is_absolute_url(url) {
        url.to_string()
    } else {
        format!("{base_url}{url}")
    }
}

/// Unread transport response, handed back to callers on non-2xx statuses.
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: response,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    pub fn headers(&self) -> &reqwest::header::HeaderMap {
        self.inner.headers()
    }

    pub async fn text(self) -> Result<String, RequestError> {
        self.inner.text().await.map_err(RequestError::from)
    }

    pub async fn bytes(self) -> Result<Vec<u8>, RequestError> {
        self.inner
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(RequestError::from)
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
