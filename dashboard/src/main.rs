//! Terminal dashboard for the crypto hub.
//!
//! Polls `/api/crypto-prices` once per interval and renders a card with a
//! price chart per asset. Press `c` to switch between USD and INR.

mod api;
mod format;
mod model;
mod poller;
mod state;
mod tui;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use api::PriceClient;
use model::Currency;
use state::{Dashboard, ViewState};

const DEFAULT_URL: &str = "http://127.0.0.1:3000/api/crypto-prices";
const MIN_INTERVAL_MS: u64 = 100;

#[derive(Parser)]
#[command(
    name = "crypto-dashboard",
    version,
    about = "Live terminal view of simulated crypto prices"
)]
struct Cli {
    /// Price endpoint of the hub
    #[arg(long, env = "DASHBOARD_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 1_000)]
    interval_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,

    /// Currency shown at startup
    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    currency: Currency,

    /// Fetch once, print plain-text cards and exit
    #[arg(long)]
    once: bool,

    /// Write logs to this file (the interactive UI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let client = PriceClient::new(&cli.url, Duration::from_millis(cli.timeout_ms))
        .context("building HTTP client")?;
    tracing::info!(url = client.url(), "dashboard starting");

    if cli.once {
        return run_once(&client, cli.currency).await;
    }

    let every = Duration::from_millis(cli.interval_ms.max(MIN_INTERVAL_MS));
    tui::run(client, every, cli.currency).await
}

async fn run_once(client: &PriceClient, currency: Currency) -> Result<()> {
    let mut dashboard = Dashboard::new(currency);
    dashboard.apply(1, client.fetch().await);
    match dashboard.view() {
        ViewState::Ready(assets) => {
            print!("{}", ui::plain_cards(assets, currency));
            Ok(())
        }
        ViewState::Error(msg) => bail!("fetching {}: {msg}", client.url()),
        ViewState::Loading => bail!("no response from {}", client.url()),
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if cli.once => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
        // Interactive mode without a log file: stderr would corrupt the UI.
        None => {}
    }
    Ok(())
}
