//! Client configuration and endpoint URL construction.

use serde::Deserialize;

pub const GETH_DEFAULT_RPC_PORT: u16 = 8545;
pub const ETH_DEFAULT_RPC_PORT: u16 = 8545;
pub const PARITY_DEFAULT_RPC_PORT: u16 = 8545;
pub const PYETHAPP_DEFAULT_RPC_PORT: u16 = 4000;

/// Transport-level retries for failed connection attempts.
pub const MAX_RETRIES: u32 = 3;

pub const DEFAULT_HOST: &str = "localhost";

/// Where and how to reach the node. Immutable once handed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: bool,
    /// Connection retries performed by the transport before giving up.
    pub max_retries: u32,
    /// Overall per-request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_owned()),
            port: Some(GETH_DEFAULT_RPC_PORT),
            tls: false,
            max_retries: MAX_RETRIES,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(host: Option<&str>, port: Option<u16>, tls: bool) -> Self {
        Self {
            host: host.map(str::to_owned),
            port,
            tls,
            ..Self::default()
        }
    }

    pub fn scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    /// URL every request is posted to.
    ///
    /// - host and port: `scheme://host:port`
    /// - host only, or port 0: `scheme://host`
    /// - no host: the bare scheme, which no transport accepts
    pub fn endpoint_url(&self) -> String {
        let scheme = self.scheme();
        match (self.host.as_deref(), self.port.filter(|&port| port != 0)) {
            (Some(host), Some(port)) if !host.is_empty() => format!("{scheme}://{host}:{port}"),
            (Some(host), None) if !host.is_empty() => format!("{scheme}://{host}"),
            _ => scheme.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_with_host_and_port() {
        let config = ClientConfig::new(Some("localhost"), Some(8545), false);
        assert_eq!(config.endpoint_url(), "http://localhost:8545");
    }

    #[test]
    fn endpoint_url_with_tls_and_no_port() {
        let config = ClientConfig::new(Some("localhost"), None, true);
        assert_eq!(config.endpoint_url(), "https://localhost");
    }

    #[test]
    fn endpoint_url_treats_port_zero_as_unset() {
        let config = ClientConfig::new(Some("localhost"), Some(0), false);
        assert_eq!(config.endpoint_url(), "http://localhost");
    }

    #[test]
    fn endpoint_url_without_host_is_bare_scheme() {
        let config = ClientConfig::new(None, Some(8545), false);
        assert_eq!(config.endpoint_url(), "http");

        let config = ClientConfig::new(Some(""), None, true);
        assert_eq!(config.endpoint_url(), "https");
    }

    #[test]
    fn default_targets_local_geth() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint_url(), "http://localhost:8545");
        assert_eq!(config.max_retries, MAX_RETRIES);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host": "node.example", "tls": true}"#)
                .expect("partial config must deserialize");
        assert_eq!(config.endpoint_url(), "https://node.example:8545");
        assert_eq!(config.max_retries, MAX_RETRIES);

        let config: ClientConfig = serde_json::from_str(r#"{"port": null}"#)
            .expect("explicit null port must deserialize");
        assert_eq!(config.endpoint_url(), "http://localhost");
    }
}
