use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::CoreError;

/// Resolve the endpoint URL of `config`, rejecting anything a transport
/// could never post to (such as the bare scheme left when no host is set).
pub(super) fn resolve_endpoint(config: &ClientConfig) -> Result<String, CoreError> {
    let url = config.endpoint_url();
    let parsed = Url::parse(&url).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid RPC endpoint `{url}`: expected HTTP(S) URL with a host ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}
