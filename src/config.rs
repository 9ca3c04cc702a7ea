//! Configuration for fastloop
//!
//! Strategy parameters resolve with layered precedence: value in the optional
//! TOML config file, then the named environment variable, then the built-in
//! default. Environment values that fail type coercion fall back to the
//! default silently. Credentials are resolved separately and are the only
//! fatal configuration error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Default Simmer API base URL
pub const DEFAULT_API_BASE: &str = "https://api.simmer.markets";

/// Tradable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    Sol,
}

impl Asset {
    /// Binance spot trading pair for this asset
    pub fn binance_symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTCUSDT",
            Asset::Eth => "ETHUSDT",
            Asset::Sol => "SOLUSDT",
        }
    }

    /// CoinGecko coin identifier for this asset
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Asset::Btc => "bitcoin",
            Asset::Eth => "ethereum",
            Asset::Sol => "solana",
        }
    }

    /// Phrase that must appear in the market question text
    pub fn question_pattern(&self) -> &'static str {
        match self {
            Asset::Btc => "bitcoin up or down",
            Asset::Eth => "ethereum up or down",
            Asset::Sol => "solana up or down",
        }
    }
}

impl FromStr for Asset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BTC" => Ok(Asset::Btc),
            "ETH" => Ok(Asset::Eth),
            "SOL" => Ok(Asset::Sol),
            _ => Err(()),
        }
    }
}

/// Price signal source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    /// One-minute candles from Binance (momentum + volume)
    Binance,
    /// Spot price only from CoinGecko (degraded, no momentum)
    Coingecko,
}

impl FromStr for SignalSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" => Ok(SignalSource::Binance),
            "coingecko" => Ok(SignalSource::Coingecko),
            _ => Err(()),
        }
    }
}

/// Effective strategy parameters, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct Settings {
    /// Min price divergence from 50c to trigger a trade.
    /// Present in configuration but not applied by the decision engine;
    /// see `engine` module docs.
    pub entry_threshold: Decimal,
    /// Min asset % move in the lookback window to trigger
    pub min_momentum_pct: Decimal,
    /// Max $ per trade
    pub max_position: Decimal,
    /// Price feed source
    pub signal_source: SignalSource,
    /// Minutes of price history for the momentum calculation
    pub lookback_minutes: u32,
    /// Skip markets with fewer than this many seconds remaining
    pub min_time_remaining_secs: i64,
    /// Asset to trade
    pub asset: Asset,
    /// Market window duration tag ("5m" or "15m")
    pub window: String,
    /// Scale trade size down when latest volume is below the window average
    pub volume_confidence: bool,
    /// Size trades against live portfolio balance instead of the fixed cap
    pub smart_sizing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_threshold: dec!(0.05),
            min_momentum_pct: dec!(0.5),
            max_position: dec!(5.0),
            signal_source: SignalSource::Binance,
            lookback_minutes: 5,
            min_time_remaining_secs: 60,
            asset: Asset::Btc,
            window: "5m".to_string(),
            volume_confidence: true,
            smart_sizing: false,
        }
    }
}

/// Raw file layer: every field optional so absent keys fall through
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    entry_threshold: Option<Decimal>,
    min_momentum_pct: Option<Decimal>,
    max_position: Option<Decimal>,
    signal_source: Option<SignalSource>,
    lookback_minutes: Option<u32>,
    min_time_remaining_secs: Option<i64>,
    asset: Option<Asset>,
    window: Option<String>,
    volume_confidence: Option<bool>,
    smart_sizing: Option<bool>,
}

impl FileSettings {
    /// Read the optional config file; malformed or missing files count as absent
    fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
                Self::default()
            }
        }
    }
}

/// Read an environment variable and coerce it; coercion failure is None
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}

/// Boolean env parsing accepts case-insensitive "true"/"1"/"yes"
fn env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    Some(matches!(val.to_lowercase().as_str(), "true" | "1" | "yes"))
}

impl Settings {
    /// Resolve effective settings: config file > environment > defaults.
    /// Never fails; unusable layers fall through to the next one.
    pub fn resolve(path: Option<&Path>) -> Self {
        let file = path
            .map(FileSettings::load)
            .unwrap_or_else(|| FileSettings::load(Path::new("fastloop.toml")));
        let defaults = Settings::default();

        Settings {
            entry_threshold: file
                .entry_threshold
                .or_else(|| env_parse("SIMMER_SPRINT_ENTRY"))
                .unwrap_or(defaults.entry_threshold),
            min_momentum_pct: file
                .min_momentum_pct
                .or_else(|| env_parse("SIMMER_SPRINT_MOMENTUM"))
                .unwrap_or(defaults.min_momentum_pct),
            max_position: file
                .max_position
                .or_else(|| env_parse("SIMMER_SPRINT_MAX_POSITION"))
                .unwrap_or(defaults.max_position),
            signal_source: file
                .signal_source
                .or_else(|| env_parse("SIMMER_SPRINT_SIGNAL"))
                .unwrap_or(defaults.signal_source),
            lookback_minutes: file
                .lookback_minutes
                .or_else(|| env_parse("SIMMER_SPRINT_LOOKBACK"))
                .unwrap_or(defaults.lookback_minutes),
            min_time_remaining_secs: file
                .min_time_remaining_secs
                .or_else(|| env_parse("SIMMER_SPRINT_MIN_TIME"))
                .unwrap_or(defaults.min_time_remaining_secs),
            asset: file
                .asset
                .or_else(|| env_parse("SIMMER_SPRINT_ASSET"))
                .unwrap_or(defaults.asset),
            window: file
                .window
                .or_else(|| std::env::var("SIMMER_SPRINT_WINDOW").ok())
                .unwrap_or(defaults.window),
            volume_confidence: file
                .volume_confidence
                .or_else(|| env_bool("SIMMER_SPRINT_VOL_CONF"))
                .unwrap_or(defaults.volume_confidence),
            smart_sizing: file
                .smart_sizing
                .or_else(|| env_bool("SIMMER_SPRINT_SMART_SIZING"))
                .unwrap_or(defaults.smart_sizing),
        }
    }
}

/// Configuration errors that are fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SIMMER_API_KEY environment variable not set\nGet your API key from: simmer.markets/dashboard -> SDK tab")]
    MissingApiKey,
}

/// Brokerage credentials, resolved from the environment only
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_base: String,
}

impl Credentials {
    /// Read credentials; missing API key is the one fatal configuration error
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("SIMMER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let api_base =
            std::env::var("SIMMER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Ok(Self { api_key, api_base })
    }
}
