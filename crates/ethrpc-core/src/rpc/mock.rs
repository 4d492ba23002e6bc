use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::RpcError;

use super::{Transport, TransportResponse};

/// One request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// A mock transport for testing. Replays canned outcomes in order and
/// records every request it receives.
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, RpcError>>>,
    requests: RequestLog,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            outcomes: VecDeque::new(),
        }
    }
}

pub struct MockTransportBuilder {
    outcomes: VecDeque<Result<TransportResponse, RpcError>>,
}

impl MockTransportBuilder {
    pub fn respond(mut self, status: u16, body: impl Into<String>) -> Self {
        self.outcomes
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    /// Reply with a 200 envelope whose `result` is `result`.
    pub fn respond_result(self, result: serde_json::Value) -> Self {
        let body = serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": result });
        self.respond(200, body.to_string())
    }

    pub fn refuse_connection(mut self) -> Self {
        self.outcomes
            .push_back(Err(RpcError::Connection("connection refused".into())));
        self
    }

    /// Build the transport together with a handle on its request log.
    pub fn build(self) -> (MockTransport, RequestLog) {
        let requests = RequestLog::default();
        let transport = MockTransport {
            outcomes: Mutex::new(self.outcomes),
            requests: Arc::clone(&requests),
        };
        (transport, requests)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, RpcError> {
        self.requests
            .lock()
            .expect("request log lock poisoned")
            .push(RecordedRequest {
                url: url.to_owned(),
                headers: headers
                    .iter()
                    .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                    .collect(),
                body: serde_json::from_str(&body).expect("client must send JSON bodies"),
            });

        self.outcomes
            .lock()
            .expect("outcome queue lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Connection("no canned response left".into())))
    }
}
