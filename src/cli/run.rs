//! Run command: one decision cycle
//!
//! discover -> select -> signal -> size -> decide -> execute-or-report.
//! Any missing intermediate result ends the cycle with an informational
//! message and no trade; only startup credential problems are fatal.

use crate::config::{Credentials, Settings};
use crate::engine;
use crate::execution::{DryRunExecutor, Executor, SimmerClient};
use crate::market::{select_best, GammaClient};
use crate::risk;
use crate::signal::fetch_signal;
use chrono::Utc;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Execute real trades instead of reporting them
    #[arg(long)]
    pub live: bool,

    /// Size trades against live portfolio balance (5% per trade, capped)
    #[arg(long)]
    pub smart_sizing: bool,
}

impl RunArgs {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let gamma = GammaClient::new();
        let smart_sizing = self.smart_sizing || settings.smart_sizing;
        let (executor, simmer) = build_executor(self.live, smart_sizing)?;

        run_cycle(settings, &gamma, executor.as_ref(), simmer.as_deref(), smart_sizing).await
    }
}

/// Build the executor for the selected mode. Live trading and smart sizing
/// both need credentials and share a single broker client; plain dry runs
/// work without any.
pub(crate) fn build_executor(
    live: bool,
    smart_sizing: bool,
) -> anyhow::Result<(Arc<dyn Executor>, Option<Arc<SimmerClient>>)> {
    if live || smart_sizing {
        let credentials = Credentials::from_env()?;
        let client = Arc::new(SimmerClient::new(&credentials));
        let executor: Arc<dyn Executor> = if live {
            client.clone()
        } else {
            Arc::new(DryRunExecutor::new())
        };
        return Ok((executor, Some(client)));
    }
    Ok((Arc::new(DryRunExecutor::new()), None))
}

/// One full decision cycle. Shared by `run` and `watch`.
pub async fn run_cycle(
    settings: &Settings,
    gamma: &GammaClient,
    executor: &dyn Executor,
    simmer: Option<&SimmerClient>,
    smart_sizing: bool,
) -> anyhow::Result<()> {
    let markets = match gamma.discover(settings.asset, &settings.window).await {
        Ok(markets) => markets,
        Err(e) => {
            tracing::warn!(error = %e, "Market discovery failed, skipping cycle");
            return Ok(());
        }
    };

    if markets.is_empty() {
        tracing::info!(
            asset = ?settings.asset,
            window = %settings.window,
            "No open fast markets found"
        );
        return Ok(());
    }

    let now = Utc::now();
    let Some(market) = select_best(&markets, settings.min_time_remaining_secs, now) else {
        tracing::info!(
            candidates = markets.len(),
            min_remaining_secs = settings.min_time_remaining_secs,
            "No market with enough time remaining"
        );
        return Ok(());
    };

    tracing::info!(
        market = %market.slug,
        remaining_secs = market.remaining_secs(now).unwrap_or_default(),
        "Selected market"
    );

    let Some(signal) =
        fetch_signal(settings.signal_source, settings.asset, settings.lookback_minutes).await
    else {
        tracing::info!("No price signal available, skipping cycle");
        return Ok(());
    };

    tracing::info!(
        momentum_pct = %signal.momentum_pct,
        direction = ?signal.direction,
        price_now = %signal.price_now,
        volume_ratio = %signal.volume_ratio,
        "Price signal"
    );

    let balance = match (smart_sizing, simmer) {
        (true, Some(client)) => client.balance().await,
        _ => None,
    };
    let amount = risk::size(balance, settings.max_position, smart_sizing);

    let Some(intent) = engine::decide(market, &signal, settings, amount) else {
        return Ok(());
    };

    let response = executor.execute(&intent).await?;
    println!(
        "{} {} ${} on {} -> {}",
        intent.side.as_str().to_uppercase(),
        settings.asset.binance_symbol(),
        intent.amount_usd,
        intent.slug,
        response
    );

    Ok(())
}
