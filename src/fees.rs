use ethers_core::types::U256;
use ethers_core::utils::format_units;

use crate::error::FetchError;

pub fn wei_to_gwei(wei: U256) -> Result<f64, FetchError> {
    let conversion_err = |reason: String| FetchError::Conversion { value: wei, reason };
    let gwei = format_units(wei, "gwei").map_err(|e| conversion_err(e.to_string()))?;
    gwei.parse::<f64>()
        .map_err(|e| conversion_err(e.to_string()))
}

/// `gas_price / base_fee`, undefined when the base fee is missing or zero.
pub fn ratio(gas_price_gwei: f64, base_fee_gwei: Option<f64>) -> Option<f64> {
    match base_fee_gwei {
        Some(base_fee) if base_fee > 0.0 => Some(gas_price_gwei / base_fee),
        _ => None,
    }
}
