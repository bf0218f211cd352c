use std::time::Duration;

use ethers_core::types::{BlockId, BlockNumber, U256};
use ethers_providers::{Http, Middleware, Provider};
use url::Url;

use crate::{
    error::FetchError,
    models::{BaseFee, ChainSnapshot},
};

#[derive(Clone)]
pub struct EthClient {
    provider: Provider<Http>,
}

impl EthClient {
    pub fn new(rpc_url: &Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()?;
        let transport = Http::new_with_client(rpc_url.clone(), client);
        let provider = Provider::new(transport);
        Ok(Self { provider })
    }

    /// Queries chain id, head, base fee and gas price, one call at a time.
    pub async fn fetch_snapshot(&self) -> Result<ChainSnapshot, FetchError> {
        let chain_id = self.chain_id().await?;

        let block_number = self
            .provider
            .get_block_number()
            .await
            .map_err(|source| FetchError::Rpc {
                call: "eth_blockNumber",
                source,
            })?
            .as_u64();
        tracing::debug!(block_number, "fetched latest block number");

        let base_fee = self.base_fee().await?;

        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(|source| FetchError::Rpc {
                call: "eth_gasPrice",
                source,
            })?;
        tracing::debug!(%gas_price, "fetched gas price");

        Ok(ChainSnapshot {
            chain_id,
            block_number,
            base_fee,
            gas_price,
        })
    }

    async fn chain_id(&self) -> Result<u64, FetchError> {
        let chain_id = self
            .provider
            .get_chainid()
            .await
            .map_err(|source| FetchError::Rpc {
                call: "eth_chainId",
                source,
            })?;
        tracing::debug!(%chain_id, "fetched chain id");
        u256_to_u64(chain_id, "chain id")
    }

    /// A block without `baseFeePerGas` is not an error; only a failed call is.
    pub async fn base_fee(&self) -> Result<BaseFee, FetchError> {
        let block = self
            .provider
            .get_block(BlockId::Number(BlockNumber::Latest))
            .await
            .map_err(|source| FetchError::Rpc {
                call: "eth_getBlockByNumber",
                source,
            })?;

        let base_fee = match block.and_then(|b| b.base_fee_per_gas) {
            Some(wei) => BaseFee::Available(wei),
            None => {
                tracing::debug!("latest block carries no base fee");
                BaseFee::Missing
            }
        };
        Ok(base_fee)
    }
}

fn u256_to_u64(value: U256, what: &'static str) -> Result<u64, FetchError> {
    if value.bits() > 64 {
        return Err(FetchError::OutOfRange { what, value });
    }
    Ok(value.low_u64())
}
