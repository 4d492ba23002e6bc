pub mod config;
pub mod error;
pub mod rpc;

pub use config::ClientConfig;
pub use error::{CoreError, RpcError};
pub use rpc::{EthJsonRpc, EthRpc};
