/// Failures of a single JSON-RPC request/response cycle.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("could not connect to RPC endpoint: {0}")]
    Connection(String),

    #[error("RPC endpoint returned non-2xx HTTP status {0}")]
    BadStatusCode(u16),

    #[error("RPC response body is not valid JSON: {0}")]
    BadJson(String),

    #[error("RPC response has no `result` field: {0}")]
    BadResponse(serde_json::Value),

    #[error("RPC transport failure: {0}")]
    Transport(String),
}

impl RpcError {
    /// The node-side `{"code", "message"}` error object of a `BadResponse`,
    /// if the response carried one.
    pub fn server_error(&self) -> Option<(i64, &str)> {
        let Self::BadResponse(response) = self else {
            return None;
        };
        let error = response.get("error")?;
        let code = error.get("code")?.as_i64()?;
        let message = error.get("message")?.as_str()?;
        Some((code, message))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid RPC request: {0}")]
    InvalidRequest(String),

    #[error("RPC client is closed")]
    Closed,

    #[error("invalid block identifier `{0}`: expected a number or one of earliest, latest, pending")]
    InvalidBlock(String),

    #[error("invalid hex quantity in RPC result: {0}")]
    InvalidQuantity(String),
}
