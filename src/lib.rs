//! fastloop: momentum trading bot for Polymarket fast crypto up/down markets
//!
//! This library provides the core components for:
//! - Layered configuration (file > environment > defaults)
//! - Fast-market discovery via Gamma API with free-text expiry parsing
//! - Momentum signals from Binance candles (CoinGecko spot fallback)
//! - A decision engine mapping momentum direction to a sized trade
//! - Position sizing against a fixed cap or live portfolio balance
//! - Dry-run and live trade execution through the Simmer SDK API

pub mod cli;
pub mod config;
pub mod engine;
pub mod execution;
pub mod market;
pub mod risk;
pub mod signal;
pub mod telemetry;
