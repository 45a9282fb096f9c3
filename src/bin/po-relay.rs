use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use purchase_order_relay::logging;
use purchase_order_relay::relay::{self, RelayConfig, DEFAULT_PORT};

/// Relays purchase orders to the intake API with its credentials attached.
///
/// Requires CLIENT_ID, CLIENT_SECRET and B2B_API_URL in the environment or in
/// a `.env` file in the working directory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "RELAY_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind; keep this on loopback unless the collector runs elsewhere
    #[arg(long, env = "RELAY_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    logging::init("info,tower_http=debug", args.log_json);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: RelayConfig) -> Result<()> {
    tracing::debug!(?config, "loaded configuration");
    relay::run(&config, SocketAddr::new(args.bind, args.port)).await
}
