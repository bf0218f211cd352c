use std::process::ExitCode;

use clap::Parser;

use zk_gas_soundness::cli::Cli;
use zk_gas_soundness::config::Config;
use zk_gas_soundness::error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    zk_gas_soundness::init_tracing();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "run failed");
            eprintln!("❌ {}", err.diagnostic());
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = Config::from_cli(cli)?;
    tracing::debug!(rpc = %config.rpc_url, format = ?config.format, "resolved configuration");

    let stdout = std::io::stdout();
    zk_gas_soundness::run(&config, &mut stdout.lock()).await
}
