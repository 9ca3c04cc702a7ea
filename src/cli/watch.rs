//! Watch command: unattended polling loop
//!
//! Repeats the decision cycle on a fixed interval. Any error inside a cycle
//! is logged and the loop continues; only ctrl-c stops the process.

use super::run::{build_executor, run_cycle};
use crate::config::Settings;
use crate::market::GammaClient;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Execute real trades instead of reporting them
    #[arg(long)]
    pub live: bool,

    /// Size trades against live portfolio balance (5% per trade, capped)
    #[arg(long)]
    pub smart_sizing: bool,

    /// Seconds to sleep between cycles
    #[arg(long, default_value_t = 60)]
    pub interval_secs: u64,
}

impl WatchArgs {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let gamma = GammaClient::new();
        let smart_sizing = self.smart_sizing || settings.smart_sizing;
        let (executor, simmer) = build_executor(self.live, smart_sizing)?;

        tracing::info!(
            live = self.live,
            interval_secs = self.interval_secs,
            "Starting watch loop"
        );

        loop {
            if let Err(e) = run_cycle(
                settings,
                &gamma,
                executor.as_ref(),
                simmer.as_deref(),
                smart_sizing,
            )
            .await
            {
                tracing::error!(error = %e, "Cycle failed, continuing");
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, stopping watch loop");
                    break;
                }
                _ = tokio::time::sleep(Duration::from_secs(self.interval_secs)) => {}
            }
        }

        Ok(())
    }
}
