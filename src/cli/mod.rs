//! CLI interface for fastloop
//!
//! Provides subcommands for:
//! - `run`: one decision cycle (dry-run by default)
//! - `watch`: unattended polling loop
//! - `positions`: show open fast-market positions
//! - `config`: show the effective configuration

mod positions;
mod run;
mod watch;

pub use positions::PositionsArgs;
pub use run::{run_cycle, RunArgs};
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fastloop")]
#[command(about = "Momentum trading bot for Polymarket fast crypto up/down markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Only output warnings, errors, and executed trades
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one decision cycle (dry-run unless --live)
    Run(RunArgs),
    /// Run decision cycles on a fixed interval until interrupted
    Watch(WatchArgs),
    /// Show open fast-market positions
    Positions(PositionsArgs),
    /// Show the effective configuration
    Config,
}
