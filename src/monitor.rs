//! Runs the single-endpoint gas probe against several RPC endpoints and
//! classifies each chain by its gas_price/base_fee ratio.
//!
//! Unlike the single-endpoint report, a failing endpoint does not abort the
//! run: its error is recorded in its row and the process exits with 2 once
//! every endpoint has been probed.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    cli::MonitorCli,
    config::{parse_rpc_url, ConfigError},
    error::{one_line, AppError},
    eth::EthClient,
    fees,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub rpc: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "overpriced")]
    Overpriced,
    #[serde(rename = "underpriced")]
    Underpriced,
    #[serde(rename = "no_eip1559")]
    NoEip1559,
}

impl ChainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStatus::Healthy => "healthy",
            ChainStatus::Overpriced => "overpriced",
            ChainStatus::Underpriced => "underpriced",
            ChainStatus::NoEip1559 => "no_eip1559",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    pub name: String,
    pub rpc: String,
    pub ok: bool,
    pub error: Option<String>,
    pub chain_id: Option<u64>,
    pub block_number: Option<u64>,
    pub base_fee_gwei: Option<f64>,
    pub gas_price_gwei: Option<f64>,
    pub ratio: Option<f64>,
    pub status: Option<ChainStatus>,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub timestamp: String,
    pub multi_chain_gas_soundness: Vec<EndpointResult>,
}

impl MonitorReport {
    pub fn exit_code(&self) -> u8 {
        if self.multi_chain_gas_soundness.iter().all(|r| r.ok) {
            0
        } else {
            2
        }
    }
}

/// Pairs every endpoint with a name. Missing names default to the part of the
/// URL after the scheme. Without any `--rpc`, `RPC_URL` is the only endpoint.
pub fn resolve_endpoints(
    rpcs: &[String],
    names: &[String],
    env_rpc: Option<&str>,
) -> Result<Vec<Endpoint>, ConfigError> {
    let rpcs: Vec<String> = if rpcs.is_empty() {
        let env_rpc = env_rpc
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::NoEndpoints)?;
        vec![env_rpc.to_string()]
    } else {
        rpcs.iter().map(|r| r.trim().to_string()).collect()
    };

    let endpoints = rpcs
        .into_iter()
        .enumerate()
        .map(|(i, rpc)| {
            let name = names
                .get(i)
                .cloned()
                .unwrap_or_else(|| default_name(&rpc).to_string());
            Endpoint { name, rpc }
        })
        .collect();
    Ok(endpoints)
}

fn default_name(rpc: &str) -> &str {
    rpc.split_once("://").map_or(rpc, |(_, rest)| rest)
}

pub fn classify(
    gas_price_gwei: f64,
    base_fee_gwei: Option<f64>,
    thresholds: Thresholds,
) -> ChainStatus {
    match fees::ratio(gas_price_gwei, base_fee_gwei) {
        None => ChainStatus::NoEip1559,
        Some(r) if r > thresholds.high => ChainStatus::Overpriced,
        Some(r) if r < thresholds.low => ChainStatus::Underpriced,
        Some(_) => ChainStatus::Healthy,
    }
}

struct Sample {
    chain_id: u64,
    block_number: u64,
    base_fee_gwei: Option<f64>,
    gas_price_gwei: f64,
}

async fn sample(rpc: &str, timeout: Duration) -> anyhow::Result<Sample> {
    let url = parse_rpc_url(rpc)?;
    let client = EthClient::new(&url, timeout)?;
    let snapshot = client.fetch_snapshot().await?;
    let base_fee_gwei = snapshot
        .base_fee
        .wei()
        .map(fees::wei_to_gwei)
        .transpose()
        .context("base fee")?;
    let gas_price_gwei = fees::wei_to_gwei(snapshot.gas_price).context("gas price")?;

    Ok(Sample {
        chain_id: snapshot.chain_id,
        block_number: snapshot.block_number,
        base_fee_gwei,
        gas_price_gwei,
    })
}

pub async fn probe(endpoint: &Endpoint, timeout: Duration, thresholds: Thresholds) -> EndpointResult {
    let start = Instant::now();
    let outcome = sample(&endpoint.rpc, timeout).await;
    let elapsed_seconds = start.elapsed().as_secs_f64();

    let mut result = EndpointResult {
        name: endpoint.name.clone(),
        rpc: endpoint.rpc.clone(),
        ok: false,
        error: None,
        chain_id: None,
        block_number: None,
        base_fee_gwei: None,
        gas_price_gwei: None,
        ratio: None,
        status: None,
        elapsed_seconds,
    };

    match outcome {
        Ok(s) => {
            result.ok = true;
            result.chain_id = Some(s.chain_id);
            result.block_number = Some(s.block_number);
            result.base_fee_gwei = s.base_fee_gwei;
            result.gas_price_gwei = Some(s.gas_price_gwei);
            result.ratio = fees::ratio(s.gas_price_gwei, s.base_fee_gwei);
            result.status = Some(classify(s.gas_price_gwei, s.base_fee_gwei, thresholds));
        }
        Err(err) => {
            tracing::warn!(endpoint = %endpoint.name, "probe failed: {:#}", err);
            result.error = Some(one_line(format!("{err:#}")));
        }
    }
    result
}

/// Probes endpoints one after another, in the order given.
pub async fn collect(endpoints: &[Endpoint], timeout: Duration, thresholds: Thresholds) -> MonitorReport {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut results = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        results.push(probe(endpoint, timeout, thresholds).await);
    }
    MonitorReport {
        timestamp,
        multi_chain_gas_soundness: results,
    }
}

/// Resolves endpoints, probes them and writes the report. Returns the exit
/// code: 0 when every endpoint answered, 2 otherwise.
pub async fn run<W: Write>(
    cli: &MonitorCli,
    env_rpc: Option<&str>,
    out: &mut W,
) -> Result<u8, AppError> {
    let endpoints = resolve_endpoints(&cli.rpcs, &cli.names, env_rpc)?;
    let thresholds = Thresholds {
        high: cli.warn_ratio_high,
        low: cli.warn_ratio_low,
    };
    let report = collect(&endpoints, Duration::from_secs(cli.timeout), thresholds).await;

    let written = if cli.json {
        write_json(&report, out)
    } else {
        write_table(&report, out)
    };
    written
        .and_then(|_| out.flush().map_err(Into::into))
        .context("failed to write report to stdout")
        .map_err(AppError::Output)?;
    Ok(report.exit_code())
}

fn write_json<W: Write>(report: &MonitorReport, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

const HEADERS: [&str; 8] = [
    "Name",
    "Chain",
    "Block",
    "BaseFee (gwei)",
    "GasPrice (gwei)",
    "Ratio",
    "Status",
    "Time (s)",
];

fn table_row(result: &EndpointResult) -> [String; 8] {
    let elapsed = format!("{:.3}", result.elapsed_seconds);
    if !result.ok {
        let dash = || "-".to_string();
        let error = result.error.as_deref().unwrap_or("unknown");
        return [
            result.name.clone(),
            dash(),
            dash(),
            dash(),
            dash(),
            dash(),
            format!("ERROR: {error}"),
            elapsed,
        ];
    }

    let gwei = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"));
    let opt = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    [
        result.name.clone(),
        opt(result.chain_id),
        opt(result.block_number),
        gwei(result.base_fee_gwei),
        gwei(result.gas_price_gwei),
        result
            .ratio
            .map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}x")),
        result.status.map_or("-", |s| s.as_str()).to_string(),
        elapsed,
    ]
}

fn write_table<W: Write>(report: &MonitorReport, out: &mut W) -> anyhow::Result<()> {
    let rows: Vec<[String; 8]> = report.multi_chain_gas_soundness.iter().map(table_row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "Timestamp: {}", report.timestamp)?;
    writeln!(out, "zk-gas-soundness :: multi-chain monitor")?;
    writeln!(out)?;
    writeln!(out, "{}", line(&HEADERS.map(String::from)))?;
    writeln!(out, "{}", line(&widths.map(|w| "-".repeat(w))))?;
    for row in &rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}
