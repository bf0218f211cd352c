use std::env;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;

pub const DEFAULT_RPC_URL: &str = "https://cloudflare-eth.com";
pub const RPC_URL_ENV: &str = "RPC_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint as resolved, echoed verbatim in reports.
    pub rpc: String,
    pub rpc_url: Url,
    pub timeout: Duration,
    pub format: OutputFormat,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no RPC endpoint given via --rpc, RPC_URL or the built-in default")]
    MissingRpcUrl,
    #[error("no --rpc provided and RPC_URL is not set")]
    NoEndpoints,
    #[error("invalid RPC URL {url:?}: {reason}")]
    InvalidRpcUrl { url: String, reason: String },
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let env_rpc = env::var(RPC_URL_ENV).ok();
        let rpc = resolve(cli.rpc.as_deref(), env_rpc.as_deref(), DEFAULT_RPC_URL)?;
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        Self::new(rpc, Duration::from_secs(cli.timeout), format)
    }

    pub fn new(rpc: String, timeout: Duration, format: OutputFormat) -> Result<Self, ConfigError> {
        let rpc_url = parse_rpc_url(&rpc)?;
        Ok(Self {
            rpc,
            rpc_url,
            timeout,
            format,
        })
    }
}

/// Picks the RPC endpoint: flag first, then environment, then `default`.
/// Blank values are treated as unset.
pub fn resolve(
    flag: Option<&str>,
    env: Option<&str>,
    default: &str,
) -> Result<String, ConfigError> {
    [flag, env, Some(default)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingRpcUrl)
}

pub fn parse_rpc_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidRpcUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidRpcUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}, expected http or https"),
        }),
    }
}
