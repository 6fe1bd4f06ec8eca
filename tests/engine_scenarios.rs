//! End-to-end decision cycles against scripted price feeds.

mod common;

use common::*;
use paper_trader::config::AppConfig;
use paper_trader::connectors::PriceSource;
use paper_trader::core::TradingEngine;
use paper_trader::strategies::{Evaluator, Momentum, MovingAverageCrossover};
use paper_trader::types::{CycleOutcome, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::Arc;

async fn run(engine: &TradingEngine, ticks: usize) -> Vec<CycleOutcome> {
    let mut out = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        out.push(engine.run_cycle().await.expect("scripted source never fails"));
    }
    out
}

#[tokio::test]
async fn dip_buy_then_take_profit() {
    let cfg = config_with_balance(dec!(100));
    let dip = [dec!(100), dec!(100), dec!(100), dec!(99), dec!(97)];
    let (engine, source) = engine_with(&cfg, &dip);

    let outcomes = run(&engine, 5).await;
    assert!(outcomes[..4].iter().all(|o| *o == CycleOutcome::Hold));
    match &outcomes[4] {
        CycleOutcome::Bought(trade) => assert_eq!(trade.price, dec!(97)),
        other => panic!("expected a buy at 97, got {:?}", other),
    }

    let snap = engine.snapshot().await;
    assert_eq!(snap.balance, dec!(3));
    assert_eq!(snap.positions.len(), 1);
    assert_eq!(snap.positions[0].entry_price, dec!(97));

    // +3.09% from 97: threshold and VWAP both call for an exit
    source.push(dec!(100));
    match engine.run_cycle().await.unwrap() {
        CycleOutcome::Sold(trade) => {
            assert_eq!(trade.price, dec!(100));
            assert_eq!(trade.profit, Some(dec!(3)));
        }
        other => panic!("expected a sell at 100, got {:?}", other),
    }

    let snap = engine.snapshot().await;
    assert_eq!(snap.balance, dec!(103));
    assert!(snap.positions.is_empty());
    assert_eq!(snap.total_trades, 2);
    assert_eq!(snap.total_profit_loss, dec!(3));
    assert_eq!(snap.last_price, Some(dec!(100)));
}

#[tokio::test]
async fn exact_two_percent_drop_triggers_entry() {
    let cfg = config_with_balance(dec!(100));
    let (engine, _) = engine_with(&cfg, &[dec!(100), dec!(100), dec!(100), dec!(98), dec!(97)]);

    let outcomes = run(&engine, 5).await;
    assert!(matches!(&outcomes[3], CycleOutcome::Bought(t) if t.price == dec!(98)));
    // already holding: VWAP stays quiet and the threshold is only -1% from 98
    assert_eq!(outcomes[4], CycleOutcome::Hold);
    assert_eq!(engine.snapshot().await.balance, dec!(2));
}

#[tokio::test]
async fn unaffordable_dip_is_not_bought() {
    let cfg = config_with_balance(dec!(50));
    let (engine, _) = engine_with(&cfg, &[dec!(100), dec!(100), dec!(100), dec!(99), dec!(97)]);

    let outcomes = run(&engine, 5).await;
    assert!(outcomes.iter().all(|o| *o == CycleOutcome::Hold));
    let snap = engine.snapshot().await;
    assert_eq!(snap.balance, dec!(50));
    assert_eq!(snap.total_trades, 0);
}

#[tokio::test]
async fn sell_signal_without_position_does_nothing() {
    // price jumps well above the seeded reference and above VWAP while flat
    let cfg = config_with_balance(dec!(1000));
    let (engine, _) = engine_with(&cfg, &[dec!(100), dec!(100), dec!(110)]);

    let outcomes = run(&engine, 3).await;
    assert!(outcomes.iter().all(|o| *o == CycleOutcome::Hold));
    assert_eq!(engine.performance().await.total_trades, 0);
}

fn single_voter_engine(
    evaluator: Box<dyn Evaluator>,
    prices: &[Decimal],
) -> Arc<TradingEngine> {
    let mut cfg = config_with_balance(dec!(100000));
    cfg.strategy.buy_quorum = 1;
    let source: Arc<dyn PriceSource> = Arc::new(ScriptedSource::new(prices));
    Arc::new(TradingEngine::with_panel(&cfg, source, vec![evaluator]))
}

#[tokio::test]
async fn crossover_waits_for_both_windows() {
    let prices: Vec<Decimal> = (0..25).map(|i| Decimal::from(100 + i)).collect();
    let engine = single_voter_engine(Box::new(MovingAverageCrossover), &prices);

    let outcomes = run(&engine, 25).await;
    let first_trade = outcomes.iter().position(|o| *o != CycleOutcome::Hold);
    assert_eq!(first_trade, Some(19));
}

#[tokio::test]
async fn momentum_waits_for_twenty_samples() {
    let prices: Vec<Decimal> = (0..25).map(|i| Decimal::from(100 + i)).collect();
    let engine = single_voter_engine(Box::new(Momentum::new(20)), &prices);

    let outcomes = run(&engine, 25).await;
    let first_trade = outcomes.iter().position(|o| *o != CycleOutcome::Hold);
    assert_eq!(first_trade, Some(19));
}

#[tokio::test]
async fn momentum_reads_the_previous_tick() {
    // mean of 19 x 100 and 90 is 99.5; the previous tick (100) sits above it
    let mut prices = vec![dec!(100); 19];
    prices.push(dec!(90));
    let engine = single_voter_engine(Box::new(Momentum::new(20)), &prices);

    let outcomes = run(&engine, 20).await;
    assert!(outcomes[..19].iter().all(|o| *o == CycleOutcome::Hold));
    match &outcomes[19] {
        CycleOutcome::Bought(trade) => assert_eq!(trade.price, dec!(90)),
        other => panic!("expected a buy at 90, got {:?}", other),
    }
}

#[tokio::test]
async fn momentum_sits_out_the_first_tick() {
    // a one-sample lookback is ready on tick 1, but there is no previous price yet
    let engine = single_voter_engine(Box::new(Momentum::new(1)), &[dec!(100), dec!(90)]);

    let outcomes = run(&engine, 2).await;
    assert_eq!(outcomes[0], CycleOutcome::Hold);
    assert!(matches!(&outcomes[1], CycleOutcome::Bought(t) if t.price == dec!(90)));
}

#[tokio::test]
async fn ledger_identities_hold_on_a_random_walk() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut price = dec!(150);
    let prices: Vec<Decimal> = (0..600)
        .map(|_| {
            let step = Decimal::from(rng.gen_range(-300i64..=300)) / dec!(100);
            price = (price + step).max(dec!(1));
            price
        })
        .collect();

    let cfg = AppConfig {
        initial_balance: dec!(500),
        ..AppConfig::default()
    };
    let (engine, _) = engine_with(&cfg, &prices);
    run(&engine, prices.len()).await;

    let report = engine.performance().await;
    let snap = engine.snapshot().await;

    let mut expected = report.initial_balance;
    let mut open: VecDeque<Decimal> = VecDeque::new();
    for trade in &report.trades {
        match trade.side {
            Side::Buy => {
                expected -= trade.price;
                open.push_back(trade.price);
            }
            Side::Sell => {
                expected += trade.price;
                let entry = open.pop_front().expect("sell without an open position");
                assert_eq!(trade.profit, Some(trade.price - entry));
            }
        }
        assert!(expected >= Decimal::ZERO);
    }

    assert_eq!(snap.balance, expected);
    assert_eq!(report.current_balance, expected);
    assert_eq!(snap.positions.len(), open.len());
    let entries: Vec<Decimal> = snap.positions.iter().map(|p| p.entry_price).collect();
    assert_eq!(entries, Vec::from(open));
}
