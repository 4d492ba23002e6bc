use crate::error::{CoreError, RpcError};

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const JSONRPC_VERSION: &str = "2.0";
pub const DEFAULT_REQUEST_ID: u64 = 1;

/// A single JSON-RPC 2.0 request envelope.
///
/// Serializes with exactly the keys `jsonrpc`, `method`, `params`, `id`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<serde_json::Value>,
    id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    /// A request with no params and id 1.
    pub fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: Vec::new(),
            id: DEFAULT_REQUEST_ID,
        }
    }

    pub fn with_params(mut self, params: Vec<serde_json::Value>) -> Self {
        self.params = params;
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn params(&self) -> &[serde_json::Value] {
        &self.params
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(super) fn to_body(&self) -> Result<String, CoreError> {
        if self.method.is_empty() {
            return Err(CoreError::InvalidRequest(
                "method name must not be empty".to_owned(),
            ));
        }
        serde_json::to_string(self)
            .map_err(|e| CoreError::InvalidRequest(format!("encode JSON-RPC request: {e}")))
    }
}

pub(super) fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode a response body into its JSON value, keeping the raw text on failure.
pub(super) fn decode_response_body(body: &str) -> Result<serde_json::Value, RpcError> {
    serde_json::from_str(body).map_err(|_| RpcError::BadJson(body.to_owned()))
}

/// Pull the `result` member out of a decoded response envelope.
///
/// A `"result": null` member is a successful null result; only a missing
/// member is an error.
pub(super) fn extract_result(mut response: serde_json::Value) -> Result<serde_json::Value, RpcError> {
    match response
        .as_object_mut()
        .and_then(|object| object.remove("result"))
    {
        Some(result) => Ok(result),
        None => Err(RpcError::BadResponse(response)),
    }
}
