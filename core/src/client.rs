//! Asynchronous JSON request client with an enforced timeout.
//!
//! # Design
//! `RequestClient` holds an immutable `ClientConfig` and a `reqwest::Client`
//! and carries no other state, so concurrent calls never interfere. Each call
//! runs the whole exchange (send, status check, body read, parse) inside one
//! `tokio::time::timeout`. When the deadline passes the exchange future is
//! dropped, which aborts the transport request, and the call fails with
//! `RequestError::Timeout`. The timer belongs to the timeout future and is
//! released on every exit path.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{resolve_url, HttpMethod, RawResponse, RequestOptions};

#[derive(Debug, Clone)]
pub struct RequestClient {
    config: ClientConfig,
    inner: reqwest::Client,
}

impl Default for RequestClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl RequestClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, ...).
    pub fn with_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self {
            config,
            inner: client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform one request and parse a 2xx body as JSON into `T`.
    ///
    /// Relative `url`s are appended to the base address from `options` or,
    /// failing that, from the client config.
    #[instrument(skip_all, fields(method = options.method.as_str(), url = url))]
    pub async fn request<T>(&self, url: &str, options: RequestOptions) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let base_url = options.base_url.as_deref().unwrap_or(&self.config.base_url);
        let target = resolve_url(url, base_url);
        let timeout = options.timeout.unwrap_or(self.config.timeout);

        let mut builder = self.inner.request(options.method.into(), target.as_str());
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        debug!(%target, timeout = ?timeout, "sending request");
        match tokio::time::timeout(timeout, exchange(builder)).await {
            Ok(Ok(value)) => {
                debug!(%target, "request succeeded");
                Ok(value)
            }
            Ok(Err(err)) => {
                debug!(%target, kind = ?err.kind(), error = %err, "request failed");
                Err(err)
            }
            Err(_) => {
                warn!(%target, timeout = ?timeout, "request timed out");
                Err(RequestError::Timeout)
            }
        }
    }

    pub async fn get<T>(&self, url: &str, options: RequestOptions) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        self.request(url, options.with_method(HttpMethod::Get)).await
    }

    /// POST `data` as JSON.
    pub async fn post<T, D>(
        &self,
        url: &str,
        data: &D,
        options: RequestOptions,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = serde_json::to_string(data)?;
        self.request(url, options.into_json(HttpMethod::Post, body))
            .await
    }

    /// PUT `data` as JSON.
    pub async fn put<T, D>(
        &self,
        url: &str,
        data: &D,
        options: RequestOptions,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = serde_json::to_string(data)?;
        self.request(url, options.into_json(HttpMethod::Put, body))
            .await
    }

    pub async fn del<T>(&self, url: &str, options: RequestOptions) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        self.request(url, options.with_method(HttpMethod::Delete))
            .await
    }
}

async fn exchange<T>(builder: reqwest::RequestBuilder) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::HttpStatus {
            status: status.as_u16(),
            response: Box::new(RawResponse::new(response)),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RequestError::unknown(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_client_uses_default_config() {
        let client = RequestClient::default();
        assert_eq!(client.config(), &ClientConfig::default());
    }

    #[test]
    fn with_client_keeps_config() {
        let config = ClientConfig::new("http://localhost:1", Duration::from_millis(5));
        let client = RequestClient::with_client(config.clone(), reqwest::Client::new());
        assert_eq!(client.config(), &config);
    }

    #[tokio::test]
    async fn unserializable_body_fails_before_sending() {
        use std::collections::HashMap;

        let client = RequestClient::new(ClientConfig::new("http://127.0.0.1:9", Duration::from_secs(1)));
        let mut data = HashMap::new();
        data.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");

        let err = client
            .post::<serde_json::Value, _>("/posts", &data, RequestOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn invalid_url_is_unknown() {
        let client = RequestClient::new(ClientConfig::new("not a url", Duration::from_secs(1)));
        let err = client
            .get::<serde_json::Value>("/x", RequestOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(!err.message().is_empty());
    }
}
