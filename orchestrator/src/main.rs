use anyhow::{Context, Result};
use b1t_common::{AppConfig, MarketSourceKind, Network};
use b1t_market::display::{format_balance_value, format_coins, format_price};
use b1t_orchestrator::{AppContext, RefreshReport};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Keeps the wallet's market price display fresh
#[derive(Debug, Parser)]
#[command(name = "price-refresher", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network whose ticker is shown (mainnet or testnet)
    #[arg(long)]
    network: Option<Network>,

    /// Market data source (coingecko or b1t-explorer)
    #[arg(long)]
    source: Option<MarketSourceKind>,

    /// Seconds between refreshes
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Refresh once and exit
    #[arg(long)]
    once: bool,

    /// Also show the fiat value of this many satoshis
    #[arg(long)]
    balance_sats: Option<u64>,
}

impl Args {
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(source) = self.source {
            config.market.source = source;
        }
        if let Some(secs) = self.interval_secs {
            config.market.refresh_interval_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }
}

async fn show_price(ctx: &AppContext, balance_sats: Option<u64>) {
    let ticker = ctx.chain_params().ticker;
    let currency = ctx.display_currency();
    let decimals = ctx.settings().display_decimals();
    let price = ctx.current_price().await;

    info!(
        "💰 1 {} = {} {}",
        ticker,
        format_price(price, decimals),
        currency.as_str().to_ascii_uppercase()
    );
    if let Some(sats) = balance_sats {
        info!(
            "   {} {} ≈ {} {}",
            format_coins(sats),
            ticker,
            format_balance_value(sats, price, decimals),
            currency.as_str().to_ascii_uppercase()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let ctx = AppContext::from_config(&config)?;
    let bridge = ctx.settings_bridge();

    info!("B1T wallet price refresher");
    info!(
        "Network: {} | Source: {} | Currency: {}",
        ctx.network(),
        ctx.selection().kind(),
        ctx.display_currency()
    );

    let refresher = ctx.refresher();

    if args.once {
        match refresher.refresh_price_display().await {
            RefreshReport::Refreshed { currencies, .. } => {
                info!("{} display currencies available", currencies.len());
            }
            RefreshReport::Skipped { source } => {
                warn!("No market data from {}, showing last known values", source);
            }
        }
        show_price(&ctx, args.balance_sats).await;
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let period = Duration::from_secs(config.market.refresh_interval_secs);

    let mut decimals = bridge.watch_display_decimals();
    let loop_handle = tokio::spawn({
        let refresher = refresher.clone();
        async move { refresher.run(period, shutdown_rx).await }
    });

    loop {
        tokio::select! {
            changed = decimals.changed() => {
                if changed.is_err() {
                    break;
                }
                show_price(&ctx, args.balance_sats).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(true);
    loop_handle.await.context("refresh loop panicked")?;
    Ok(())
}
