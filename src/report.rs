use std::io::Write;

use anyhow::{Context, Result};

use crate::{config::OutputFormat, models::GasReport};

const UNAVAILABLE: &str = "unavailable";

pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum Mainnet",
        5 => "Goerli Testnet",
        10 => "Optimism Mainnet",
        137 => "Polygon Mainnet",
        8453 => "Base Mainnet",
        42161 => "Arbitrum One",
        11155111 => "Sepolia Testnet",
        _ => "Unknown Network",
    }
}

pub fn write_report<W: Write>(report: &GasReport, format: OutputFormat, out: &mut W) -> Result<()> {
    let written = match format {
        OutputFormat::Text => write_text(report, out),
        OutputFormat::Json => write_json(report, out),
    };
    written.context("failed to write report to stdout")?;
    out.flush().context("failed to flush stdout")
}

fn write_json<W: Write>(report: &GasReport, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_text<W: Write>(report: &GasReport, out: &mut W) -> Result<()> {
    writeln!(out, "🕒 Timestamp: {}", report.timestamp)?;
    writeln!(out, "🔧 zk-gas-soundness")?;
    writeln!(out, "🔗 RPC: {}", report.rpc_url)?;
    writeln!(
        out,
        "🧭 Chain ID: {} ({})",
        report.chain_id,
        network_name(report.chain_id)
    )?;
    writeln!(out, "🧱 Block: {}", report.block_number)?;
    match report.base_fee_gwei {
        Some(base_fee) => writeln!(out, "⛽ Base Fee: {base_fee:.2} gwei")?,
        None => writeln!(out, "⛽ Base Fee: {UNAVAILABLE}")?,
    }
    writeln!(out, "💸 Current Gas Price: {:.2} gwei", report.gas_price_gwei)?;
    writeln!(out, "⏱️ Completed in {:.2}s", report.elapsed_seconds)?;

    match (report.ratio, report.base_fee_gwei) {
        (Some(ratio), _) => {
            writeln!(out, "📊 Ratio (gas_price/base_fee): {ratio:.2}x")?;
            writeln!(
                out,
                "ℹ️ A ratio well above 1.00x indicates congestion or overpayment."
            )?;
            if ratio < 1.0 {
                writeln!(
                    out,
                    "⚠️ Gas price is lower than base fee; check RPC accuracy or chain sync."
                )?;
            }
        }
        (None, Some(_)) => {
            writeln!(out, "📊 Ratio (gas_price/base_fee): {UNAVAILABLE}")?;
            writeln!(out, "⚠️ Base fee is zero; ratio is undefined.")?;
        }
        (None, None) => {
            writeln!(out, "📊 Ratio (gas_price/base_fee): {UNAVAILABLE}")?;
            writeln!(out, "⚠️ No base fee data available (legacy chain or RPC).")?;
        }
    }
    Ok(())
}
