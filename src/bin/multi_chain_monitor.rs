use std::env;
use std::process::ExitCode;

use clap::Parser;

use zk_gas_soundness::cli::MonitorCli;
use zk_gas_soundness::config::RPC_URL_ENV;
use zk_gas_soundness::monitor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    zk_gas_soundness::init_tracing();

    let cli = MonitorCli::parse();
    let env_rpc = env::var(RPC_URL_ENV).ok();

    let stdout = std::io::stdout();
    match monitor::run(&cli, env_rpc.as_deref(), &mut stdout.lock()).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("❌ {}", err.diagnostic());
            ExitCode::from(err.exit_code())
        }
    }
}
