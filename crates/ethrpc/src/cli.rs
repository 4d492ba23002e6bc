use clap::{Parser, Subcommand};
use ethrpc_core::config::{ClientConfig, DEFAULT_HOST, GETH_DEFAULT_RPC_PORT, MAX_RETRIES};
use ethrpc_core::rpc::{BlockId, DEFAULT_REQUEST_ID};

/// Query an Ethereum node over JSON-RPC.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Node host name or address.
    #[arg(long, default_value = DEFAULT_HOST, env = "ETHRPC_HOST")]
    pub host: String,

    /// Node RPC port.
    #[arg(long, default_value_t = GETH_DEFAULT_RPC_PORT, env = "ETHRPC_PORT")]
    pub port: u16,

    /// Omit the port from the endpoint URL (e.g. behind a reverse proxy).
    #[arg(long)]
    pub no_port: bool,

    /// Connect over HTTPS.
    #[arg(long, env = "ETHRPC_TLS")]
    pub tls: bool,

    /// Connection retries before giving up.
    #[arg(long, default_value_t = MAX_RETRIES)]
    pub max_retries: u32,

    /// Per-request timeout in seconds (transport default if omitted).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Invoke an arbitrary method. Params are parsed as JSON, falling back to strings.
    Call {
        method: String,
        #[arg(allow_negative_numbers = true)]
        params: Vec<String>,
        /// Request id.
        #[arg(long, default_value_t = DEFAULT_REQUEST_ID)]
        id: u64,
    },
    /// Print the node's coinbase address.
    Coinbase,
    /// Print the latest block number.
    BlockNumber,
    /// Print an account balance in wei (coinbase if no address is given).
    Balance {
        address: Option<String>,
        #[arg(long, default_value = "latest")]
        block: BlockId,
    },
    /// Print the code stored at an address.
    Code {
        address: String,
        #[arg(long, default_value = "latest")]
        block: BlockId,
    },
    /// Print a storage slot of an address.
    Storage {
        address: String,
        position: u64,
        #[arg(long, default_value = "latest")]
        block: BlockId,
    },
    /// Print a block.
    Block {
        #[arg(long, default_value = "latest")]
        block: BlockId,
        /// List transaction hashes instead of full transaction objects.
        #[arg(long)]
        hashes_only: bool,
    },
    /// Print a transaction receipt.
    Receipt { tx_hash: String },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: Some(self.host.clone()),
            port: (!self.no_port).then_some(self.port),
            tls: self.tls,
            max_retries: self.max_retries,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Parse a positional param as JSON, treating anything unparseable as a string.
pub fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_prefers_json() {
        assert_eq!(parse_param("true"), serde_json::json!(true));
        assert_eq!(parse_param("12"), serde_json::json!(12));
        assert_eq!(parse_param(r#"{"to":"0x1"}"#), serde_json::json!({"to": "0x1"}));
        assert_eq!(parse_param(r#""latest""#), serde_json::json!("latest"));
    }

    #[test]
    fn parse_param_falls_back_to_string() {
        assert_eq!(parse_param("0xabc"), serde_json::json!("0xabc"));
        assert_eq!(parse_param("latest"), serde_json::json!("latest"));
    }

    #[test]
    fn client_config_honors_no_port_and_tls() {
        let cli = Cli::parse_from(["ethrpc", "--host", "node.example", "--no-port", "--tls", "coinbase"]);
        let config = cli.client_config();
        assert_eq!(config.endpoint_url(), "https://node.example");
    }

    #[test]
    fn call_collects_params_and_id() {
        let cli = Cli::parse_from(["ethrpc", "call", "eth_call", r#"{"to":"0x1"}"#, "latest", "--id", "5"]);
        let Command::Call { method, params, id } = cli.command else {
            panic!("expected call command");
        };
        assert_eq!(method, "eth_call");
        assert_eq!(params, [r#"{"to":"0x1"}"#, "latest"]);
        assert_eq!(id, 5);
    }

    #[test]
    fn call_accepts_negative_params() {
        let cli = Cli::parse_from(["ethrpc", "call", "foo", "-1", "-2.5", "--id", "3"]);
        let Command::Call { params, id, .. } = cli.command else {
            panic!("expected call command");
        };
        assert_eq!(params, ["-1", "-2.5"]);
        assert_eq!(id, 3);
        assert_eq!(parse_param(&params[0]), serde_json::json!(-1));
    }

    #[test]
    fn block_flag_parses_numbers_and_tags() {
        let cli = Cli::parse_from(["ethrpc", "block", "--block", "0x10", "--hashes-only"]);
        let Command::Block { block, hashes_only } = cli.command else {
            panic!("expected block command");
        };
        assert_eq!(block, BlockId::Number(16));
        assert!(hashes_only);

        assert!(Cli::try_parse_from(["ethrpc", "balance", "--block", "safe"]).is_err());
    }
}
