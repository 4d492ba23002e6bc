mod cli;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::Value;

use ethrpc_core::rpc::{EthJsonRpc, EthRpc, JsonRpcRequest};
use ethrpc_core::{CoreError, RpcError};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let client = EthJsonRpc::new(args.client_config()).context("configure RPC client")?;
    tracing::debug!(url = client.url(), "using RPC endpoint");

    let outcome = run(&client, args.command).await;
    client.close().await;

    let result = outcome.map_err(|err| {
        let message = format_rpc_error(client.url(), &err);
        eyre!(message).wrap_err("RPC request failed")
    })?;

    let rendered = serde_json::to_string_pretty(&result).context("render RPC result")?;
    println!("{rendered}");
    Ok(())
}

async fn run(client: &EthJsonRpc, command: Command) -> Result<Value, CoreError> {
    match command {
        Command::Call { method, params, id } => {
            let params = params.iter().map(|raw| cli::parse_param(raw)).collect();
            client
                .invoke(JsonRpcRequest::new(&method).with_params(params).with_id(id))
                .await
        }
        Command::Coinbase => client.eth_coinbase().await,
        Command::BlockNumber => client.eth_block_number().await.map(Value::from),
        // Wei balances can exceed what JSON numbers hold exactly.
        Command::Balance { address, block } => client
            .eth_get_balance(address.as_deref(), block)
            .await
            .map(|wei| Value::String(wei.to_string())),
        Command::Code { address, block } => client.eth_get_code(&address, block).await,
        Command::Storage {
            address,
            position,
            block,
        } => client.eth_get_storage_at(&address, position, block).await,
        Command::Block { block, hashes_only } => {
            client.eth_get_block_by_number(block, !hashes_only).await
        }
        Command::Receipt { tx_hash } => client.eth_get_transaction_receipt(&tx_hash).await,
    }
}

fn format_rpc_error(url: &str, err: &CoreError) -> String {
    let mut lines = vec![format!("endpoint: {url}"), format!("error: {err}")];

    match err {
        CoreError::Rpc(RpcError::Connection(_)) => lines.push(
            "hint: nothing answered at the endpoint; verify the node is running and --host/--port"
                .into(),
        ),
        CoreError::Rpc(RpcError::BadStatusCode(401 | 403)) => lines.push(
            "hint: the endpoint refused the request; check proxy or provider credentials".into(),
        ),
        CoreError::Rpc(RpcError::BadStatusCode(404)) => {
            lines.push("hint: no RPC service at this URL; check --host/--port and --no-port".into())
        }
        CoreError::Rpc(RpcError::BadJson(_)) => lines.push(
            "hint: the endpoint did not answer with JSON; it may not be a JSON-RPC node".into(),
        ),
        CoreError::Rpc(rpc_err) => {
            if let Some((code, message)) = rpc_err.server_error() {
                lines.push(format!("node error {code}: {message}"));
            }
        }
        _ => {}
    }

    lines.join("\n")
}
