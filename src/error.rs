use std::fmt::Display;

use ethers_core::types::U256;
use ethers_providers::ProviderError;

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("{call} failed: {source}")]
    Rpc {
        call: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: U256 },
    #[error("failed to convert {value} wei to gwei: {reason}")]
    Conversion { value: U256, reason: String },
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{0:#}")]
    Output(anyhow::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Fetch(_) => 2,
            AppError::Output(_) => 1,
        }
    }

    /// Single-line message for stderr.
    pub fn diagnostic(&self) -> String {
        one_line(self)
    }
}

/// Collapses a message onto one line. Provider errors embed raw response
/// bodies, which may be multi-line HTML from a gateway.
pub fn one_line(msg: impl Display) -> String {
    msg.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_and_fetch_errors_exit_with_two() {
        let config: AppError = ConfigError::MissingRpcUrl.into();
        assert_eq!(config.exit_code(), 2);

        let fetch: AppError = FetchError::OutOfRange {
            what: "chain id",
            value: U256::MAX,
        }
        .into();
        assert_eq!(fetch.exit_code(), 2);
    }

    #[test]
    fn one_line_collapses_embedded_newlines() {
        let msg = one_line("eth_chainId failed: Response: <html>\n<body>\n  502 Bad Gateway\n</body>\n");
        assert_eq!(msg, "eth_chainId failed: Response: <html> <body> 502 Bad Gateway </body>");
        assert_eq!(msg.lines().count(), 1);
    }

    #[test]
    fn output_errors_exit_with_one() {
        let err = AppError::Output(anyhow::anyhow!("broken pipe"));
        assert_eq!(err.exit_code(), 1);
    }
}
