use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "zk-gas-soundness",
    version,
    about = "Compare the latest base fee against the current gas price of an EVM chain"
)]
pub struct Cli {
    /// EVM RPC URL (overrides RPC_URL)
    #[arg(long)]
    pub rpc: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Per-request RPC timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

#[derive(Parser, Debug)]
#[command(
    name = "multi_chain_monitor",
    version,
    about = "Compare gas_price/base_fee ratios across several EVM endpoints"
)]
pub struct MonitorCli {
    /// RPC endpoint URL; repeat to monitor several chains (falls back to RPC_URL)
    #[arg(long = "rpc")]
    pub rpcs: Vec<String>,

    /// Display name for each --rpc, in the same order; defaults to the URL host
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Ratio above which a chain is marked overpriced
    #[arg(long, default_value_t = 2.0)]
    pub warn_ratio_high: f64,

    /// Ratio below which a chain is marked underpriced
    #[arg(long, default_value_t = 0.9)]
    pub warn_ratio_low: f64,

    /// Per-request RPC timeout in seconds
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}
