use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{CoreError, RpcError};

use super::super::EthRpc;
use super::connection::resolve_endpoint;
use super::protocol::{extract_result, is_success_status, JsonRpcRequest, JSON_MEDIA_TYPE};
use super::transport::{HttpTransport, Transport};

/// Ethereum JSON-RPC client over HTTP(S).
///
/// Every call posts exactly one request envelope through the shared
/// transport session and expects exactly one response envelope back. The
/// session lives until [`EthJsonRpc::close`]; calls made after that fail
/// with [`CoreError::Closed`].
pub struct EthJsonRpc {
    config: ClientConfig,
    url: String,
    session: RwLock<Option<Arc<dyn Transport>>>,
}

impl EthJsonRpc {
    /// Create a client posting through a pooled `reqwest` session.
    ///
    /// Fails with [`CoreError::InvalidConfig`] when the configured endpoint
    /// is not a usable HTTP(S) URL, e.g. when no host is set.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client posting through an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, CoreError> {
        let url = resolve_endpoint(&config)?;
        let session: Arc<dyn Transport> = Arc::new(transport);
        Ok(Self {
            config,
            url,
            session: RwLock::new(Some(session)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request envelope and unwrap the `result` of the reply.
    pub async fn invoke(&self, request: JsonRpcRequest<'_>) -> Result<Value, CoreError> {
        let body = request.to_body()?;
        let transport = self
            .session
            .read()
            .await
            .as_ref()
            .map(Arc::clone)
            .ok_or(CoreError::Closed)?;

        let id = request.id();
        let method = request.method();
        debug!(rpc.id = id, rpc.method = method, request = %body, "rpc send");

        let response = transport
            .post(
                &self.url,
                &[(header::CONTENT_TYPE.as_str(), JSON_MEDIA_TYPE)],
                body,
            )
            .await?;
        if !is_success_status(response.status) {
            return Err(RpcError::BadStatusCode(response.status).into());
        }

        let decoded = response.json()?;
        debug!(
            rpc.id = id,
            rpc.method = method,
            status = response.status,
            response = %decoded,
            "rpc response"
        );

        Ok(extract_result(decoded)?)
    }

    /// Release the transport session. Closing twice is a no-op.
    pub async fn close(&self) {
        if self.session.write().await.take().is_some() {
            debug!(url = %self.url, "rpc session closed");
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.session.read().await.is_none()
    }
}

impl fmt::Debug for EthJsonRpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthJsonRpc")
            .field("url", &self.url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EthRpc for EthJsonRpc {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        self.invoke(JsonRpcRequest::new(method).with_params(params))
            .await
    }
}
