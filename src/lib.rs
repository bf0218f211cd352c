pub mod cli;
pub mod config;
pub mod error;
pub mod eth;
pub mod fees;
pub mod models;
pub mod monitor;
pub mod report;

use std::io::Write;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};

use crate::{
    config::Config,
    error::{AppError, FetchError},
    eth::EthClient,
    models::GasReport,
};

/// Logs go to stderr; stdout carries only the report.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

/// Fetches, computes and prints one report. Nothing is written on error.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), AppError> {
    let report = collect_report(config).await?;
    report::write_report(&report, config.format, out).map_err(AppError::Output)
}

pub async fn collect_report(config: &Config) -> Result<GasReport, FetchError> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let start = Instant::now();

    let client = EthClient::new(&config.rpc_url, config.timeout)?;
    let snapshot = client.fetch_snapshot().await?;

    let base_fee_gwei = snapshot.base_fee.wei().map(fees::wei_to_gwei).transpose()?;
    let gas_price_gwei = fees::wei_to_gwei(snapshot.gas_price)?;
    let ratio = fees::ratio(gas_price_gwei, base_fee_gwei);

    let elapsed_seconds = start.elapsed().as_secs_f64();
    tracing::debug!(elapsed_seconds, ?ratio, "gas report computed");

    Ok(GasReport {
        timestamp,
        rpc_url: config.rpc.clone(),
        chain_id: snapshot.chain_id,
        block_number: snapshot.block_number,
        base_fee_gwei,
        gas_price_gwei,
        ratio,
        elapsed_seconds,
    })
}
