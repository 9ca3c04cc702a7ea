//! Positions command: show open fast-market positions

use crate::config::Credentials;
use crate::execution::SimmerClient;
use clap::Args;

#[derive(Args, Debug)]
pub struct PositionsArgs {}

impl PositionsArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let credentials = Credentials::from_env()?;
        let client = SimmerClient::new(&credentials);

        let positions = client.fast_market_positions().await?;
        if positions.is_empty() {
            println!("No open fast-market positions");
            return Ok(());
        }

        println!("Open fast-market positions:");
        for p in positions {
            println!(
                "  {} {} shares={} value=${}",
                p.market_slug,
                p.side,
                p.shares.map(|s| s.to_string()).unwrap_or_else(|| "?".into()),
                p.current_value
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "?".into()),
            );
        }
        Ok(())
    }
}
