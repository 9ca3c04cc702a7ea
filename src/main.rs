use clap::Parser;
use fastloop::cli::{Cli, Commands};
use fastloop::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    fastloop::telemetry::init_logging(cli.quiet)?;

    // Resolved once; immutable for the process lifetime
    let settings = Settings::resolve(cli.config.as_deref());

    match cli.command {
        Commands::Run(args) => {
            args.execute(&settings).await?;
        }
        Commands::Watch(args) => {
            args.execute(&settings).await?;
        }
        Commands::Positions(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            println!("Effective configuration:");
            println!("  Asset: {:?} ({})", settings.asset, settings.window);
            println!("  Signal: {:?}, lookback {}m", settings.signal_source, settings.lookback_minutes);
            println!("  Entry threshold: {}", settings.entry_threshold);
            println!("  Min momentum: {}%", settings.min_momentum_pct);
            println!("  Max position: ${}", settings.max_position);
            println!("  Min time remaining: {}s", settings.min_time_remaining_secs);
            println!("  Volume confidence: {}", settings.volume_confidence);
            println!("  Smart sizing: {}", settings.smart_sizing);
        }
    }

    Ok(())
}
