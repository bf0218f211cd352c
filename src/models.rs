use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// Outcome of reading `baseFeePerGas` from the latest block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFee {
    Available(U256),
    /// Pre-London or non-EIP-1559 chain.
    Missing,
}

impl BaseFee {
    pub fn wei(&self) -> Option<U256> {
        match self {
            BaseFee::Available(wei) => Some(*wei),
            BaseFee::Missing => None,
        }
    }
}

/// Raw values read from the node, in wei.
#[derive(Debug, Clone)]
pub struct ChainSnapshot {
    pub chain_id: u64,
    pub block_number: u64,
    pub base_fee: BaseFee,
    pub gas_price: U256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GasReport {
    pub timestamp: String,
    #[serde(rename = "rpc")]
    pub rpc_url: String,
    pub chain_id: u64,
    #[serde(rename = "block")]
    pub block_number: u64,
    pub base_fee_gwei: Option<f64>,
    pub gas_price_gwei: f64,
    pub ratio: Option<f64>,
    pub elapsed_seconds: f64,
}
