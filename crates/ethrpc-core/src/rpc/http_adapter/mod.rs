//! Native JSON-RPC client for Ethereum-compatible HTTP endpoints.
//!
//! Implements [`EthRpc`](super::EthRpc) over a pluggable [`Transport`], with
//! a `reqwest` transport that keeps one pooled session and retries failed
//! connection attempts.

mod client;
mod connection;
mod protocol;
mod transport;

pub use client::EthJsonRpc;
pub use protocol::{JsonRpcRequest, DEFAULT_REQUEST_ID, JSON_MEDIA_TYPE};
pub use transport::{HttpTransport, Transport, TransportResponse};
