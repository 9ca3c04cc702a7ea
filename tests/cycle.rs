//! End-to-end tests of the decision path: select -> signal -> size -> decide
//! -> report, using the dry-run executor so no network is involved.

use chrono::{Duration, Utc};
use fastloop::config::Settings;
use fastloop::engine;
use fastloop::execution::{DryRunExecutor, Executor, TradeSide};
use fastloop::market::{select_best, CandidateMarket};
use fastloop::risk;
use fastloop::signal::{Candle, Direction, MomentumSignal};
use rust_decimal_macros::dec;

fn market(slug: &str, remaining_secs: i64) -> CandidateMarket {
    let now = Utc::now();
    CandidateMarket {
        question: format!("Bitcoin Up or Down - {}", slug),
        slug: slug.to_string(),
        condition_id: format!("0x{}", slug.len()),
        end_time: Some(now + Duration::seconds(remaining_secs)),
        outcomes: vec!["Up".to_string(), "Down".to_string()],
        outcome_prices: vec![dec!(0.51), dec!(0.49)],
        fee_rate_bps: 0,
    }
}

fn rising_candles() -> Vec<Candle> {
    vec![
        Candle {
            open: dec!(100000),
            close: dec!(100400),
            volume: dec!(12),
        },
        Candle {
            open: dec!(100400),
            close: dec!(100800),
            volume: dec!(12),
        },
    ]
}

#[tokio::test]
async fn full_cycle_buys_on_up_momentum() {
    let settings = Settings::default();
    let now = Utc::now();

    let markets = vec![
        market("bitcoin-up-or-down-5m-a", 30),
        market("bitcoin-up-or-down-5m-b", 120),
        market("bitcoin-up-or-down-5m-c", 300),
    ];
    let selected = select_best(&markets, settings.min_time_remaining_secs, now).unwrap();
    assert_eq!(selected.slug, "bitcoin-up-or-down-5m-b");

    // 0.8% up move clears the 0.5% default gate
    let signal = MomentumSignal::from_candles(&rising_candles()).unwrap();
    assert_eq!(signal.direction, Direction::Up);
    assert_eq!(signal.momentum_pct, dec!(0.8));

    let amount = risk::size(None, settings.max_position, settings.smart_sizing);
    let intent = engine::decide(selected, &signal, &settings, amount).unwrap();
    assert_eq!(intent.side, TradeSide::Buy);
    assert_eq!(intent.amount_usd, dec!(5.0));

    let executor = DryRunExecutor::new();
    let response = executor.execute(&intent).await.unwrap();
    assert_eq!(response["dry_run"], serde_json::json!(true));

    let reported = executor.reported().await;
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].slug, "bitcoin-up-or-down-5m-b");
}

#[tokio::test]
async fn no_selectable_market_means_no_trade() {
    let settings = Settings::default();
    let now = Utc::now();

    // Every market expires too soon; nothing downstream runs
    let markets = vec![
        market("bitcoin-up-or-down-5m-a", 10),
        market("bitcoin-up-or-down-5m-b", 45),
    ];
    assert!(select_best(&markets, settings.min_time_remaining_secs, now).is_none());
}

#[tokio::test]
async fn insufficient_candles_means_no_trade() {
    // A single candle cannot produce a signal, and without a signal no
    // intent can be constructed
    let one_candle = vec![Candle {
        open: dec!(100000),
        close: dec!(100500),
        volume: dec!(10),
    }];
    assert!(MomentumSignal::from_candles(&one_candle).is_none());
}

#[tokio::test]
async fn sub_threshold_momentum_leaves_no_side_effects() {
    let settings = Settings::default();
    let selected = market("bitcoin-up-or-down-5m-x", 120);

    // 0.1% move is below the 0.5% default gate
    let candles = vec![
        Candle {
            open: dec!(100000),
            close: dec!(100050),
            volume: dec!(10),
        },
        Candle {
            open: dec!(100050),
            close: dec!(100100),
            volume: dec!(10),
        },
    ];
    let signal = MomentumSignal::from_candles(&candles).unwrap();

    let intent = engine::decide(&selected, &signal, &settings, dec!(5));
    assert!(intent.is_none());

    let executor = DryRunExecutor::new();
    assert!(executor.reported().await.is_empty());
}

#[tokio::test]
async fn spot_fallback_cycle_sells() {
    // Degraded spot provider: Neutral direction maps to a sell
    let settings = Settings::default();
    let selected = market("bitcoin-up-or-down-5m-y", 90);
    let signal = MomentumSignal::from_spot(dec!(97000));

    let amount = risk::size(None, settings.max_position, false);
    let intent = engine::decide(&selected, &signal, &settings, amount).unwrap();
    assert_eq!(intent.side, TradeSide::Sell);

    let executor = DryRunExecutor::new();
    executor.execute(&intent).await.unwrap();
    assert_eq!(executor.reported().await.len(), 1);
}

#[test]
fn smart_sizing_vectors() {
    // balance 1000, max 5 -> min(50, 5) = 5
    assert_eq!(risk::size(Some(dec!(1000)), dec!(5), true), dec!(5));
    // balance 40, max 5 -> min(2, 5) = 2
    assert_eq!(risk::size(Some(dec!(40)), dec!(5), true), dec!(2));
    // sizing disabled ignores balance entirely
    assert_eq!(risk::size(Some(dec!(40)), dec!(5), false), dec!(5));
}
