use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{trace, warn};

use crate::config::ClientConfig;
use crate::error::{CoreError, RpcError};

use super::protocol::decode_response_body;

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(&self) -> Result<serde_json::Value, RpcError> {
        decode_response_body(&self.body)
    }
}

/// The HTTP collaborator the RPC client posts envelopes through.
///
/// Implementations report connection failures as [`RpcError::Connection`]
/// and any other transport failure as [`RpcError::Transport`]. Connection
/// retries, pooling and TLS are the implementation's business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, RpcError>;
}

/// `reqwest`-backed transport holding one pooled session.
pub struct HttpTransport {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
        })
    }

    async fn send_once(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(url)
            .headers(headers.clone())
            .body(body.to_owned())
            .send()
            .await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, RpcError> {
        let headers = build_header_map(headers)?;

        let mut attempt = 0;
        let response = loop {
            match self.send_once(url, &headers, &body).await {
                Ok(response) => break response,
                Err(err) if err.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        url,
                        attempt,
                        max_retries = self.max_retries,
                        error = %err,
                        "rpc connection failed; retrying"
                    );
                }
                Err(err) if err.is_connect() => return Err(RpcError::Connection(err.to_string())),
                Err(err) => return Err(RpcError::Transport(err.to_string())),
            }
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(format!("read response body: {e}")))?;
        trace!(url, status, body_len = body.len(), "http response");

        Ok(TransportResponse { status, body })
    }
}

fn build_header_map(headers: &[(&str, &str)]) -> Result<HeaderMap, RpcError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RpcError::Transport(format!("invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RpcError::Transport(format!("invalid header value `{value}`: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}
