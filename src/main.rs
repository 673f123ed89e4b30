//! cashweb main entry point

use anyhow::Context;
use cashweb_api::start_server;
use cashweb_config::Config;
use cashweb_core::Cashbook;
use cashweb_remote::HttpLedgerTransport;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "cashweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web dashboard for an association cash ledger", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load(args.config.clone())
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    log::info!("Config loaded from {}", args.config.display());
    log::info!("Ledger service: {} (timeout {}s)", config.remote.base_url, config.remote.timeout_secs);

    let transport = HttpLedgerTransport::new(&config.remote.base_url, config.remote_timeout())
        .context("failed to create the ledger service client")?;
    let cashbook = Cashbook::from_config(&config, Arc::new(transport)).context("invalid channel mapping")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(cashbook)))
}
