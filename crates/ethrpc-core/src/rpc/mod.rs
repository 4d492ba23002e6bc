//! Ethereum node JSON-RPC abstraction layer.
//!
//! Defines the [`EthRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`EthJsonRpc`]) plus a test transport (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::{
    EthJsonRpc, HttpTransport, JsonRpcRequest, Transport, TransportResponse, DEFAULT_REQUEST_ID,
    JSON_MEDIA_TYPE,
};
pub use types::{parse_quantity, BlockId, BlockTag};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CoreError;

/// Node methods layered on a raw JSON-RPC `call`.
///
/// Only [`EthRpc::call`] is required; the provided methods build the params
/// each node method expects and hand back the raw result, except where the
/// result is a hex quantity.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// Invoke `method` with `params` and return the response's `result`.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError>;

    async fn eth_coinbase(&self) -> Result<Value, CoreError> {
        self.call("eth_coinbase", Vec::new()).await
    }

    async fn eth_block_number(&self) -> Result<u64, CoreError> {
        let raw = self.call("eth_blockNumber", Vec::new()).await?;
        let number = parse_quantity(&raw)?;
        u64::try_from(number).map_err(|_| CoreError::InvalidQuantity(raw.to_string()))
    }

    /// Balance in wei. Without an address, the node's coinbase is queried.
    async fn eth_get_balance(&self, address: Option<&str>, block: BlockId) -> Result<u128, CoreError> {
        let address = match address {
            Some(address) => Value::from(address),
            None => self.eth_coinbase().await?,
        };
        let raw = self
            .call("eth_getBalance", vec![address, block.into()])
            .await?;
        parse_quantity(&raw)
    }

    async fn eth_get_storage_at(
        &self,
        address: &str,
        position: u64,
        block: BlockId,
    ) -> Result<Value, CoreError> {
        self.call(
            "eth_getStorageAt",
            vec![
                Value::from(address),
                Value::from(format!("{position:#x}")),
                block.into(),
            ],
        )
        .await
    }

    async fn eth_get_code(&self, address: &str, block: BlockId) -> Result<Value, CoreError> {
        self.call("eth_getCode", vec![Value::from(address), block.into()])
            .await
    }

    /// With `tx_objects`, transactions are returned in full rather than as hashes.
    async fn eth_get_block_by_number(
        &self,
        block: BlockId,
        tx_objects: bool,
    ) -> Result<Value, CoreError> {
        self.call(
            "eth_getBlockByNumber",
            vec![block.into(), Value::from(tx_objects)],
        )
        .await
    }

    async fn eth_get_transaction_receipt(&self, tx_hash: &str) -> Result<Value, CoreError> {
        self.call("eth_getTransactionReceipt", vec![Value::from(tx_hash)])
            .await
    }
}
