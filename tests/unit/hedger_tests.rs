//! Integration tests for the delta hedger cycle.

use async_trait::async_trait;
use option_delta_hedger::config::HedgeConfig;
use option_delta_hedger::hedging::{
    DeltaHedger, ExecutionReport, HedgeOrder, HedgeParams, HeldPosition, MarketDataSource,
    OrderExecutor, PlanOutcome,
};
use option_delta_hedger::portfolio::{
    ChainUniverse, Contract, ExpirationCode, OptionContract, OptionRight, UnitGreeks,
};
use option_delta_hedger::restriction::RestrictionRegistry;
use option_delta_hedger::{Error, Result};
use orderbook_rs::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

fn expiration() -> ExpirationCode {
    ExpirationCode::parse("20240119").unwrap()
}

fn option(symbol: &str, strike: Decimal, right: OptionRight) -> OptionContract {
    OptionContract::new(symbol, strike, expiration(), right)
}

/// In-memory broker state.
#[derive(Default)]
struct MockSource {
    positions: Vec<HeldPosition>,
    universe: ChainUniverse,
    greeks: HashMap<OptionContract, UnitGreeks>,
    fail: bool,
}

#[async_trait]
impl MarketDataSource for MockSource {
    async fn positions(&self) -> Result<Vec<HeldPosition>> {
        if self.fail {
            return Err(Error::market_data("disconnected"));
        }
        Ok(self.positions.clone())
    }

    async fn chain_universe(&self, _underlying: &str) -> Result<ChainUniverse> {
        Ok(self.universe.clone())
    }

    async fn option_greeks(&self, contract: &OptionContract) -> Result<Option<UnitGreeks>> {
        Ok(self.greeks.get(contract).copied())
    }
}

/// Records orders and fills them, optionally rejecting the n-th one.
#[derive(Default)]
struct MockExecutor {
    orders: Mutex<Vec<(Side, u64, Contract)>>,
    reject_at: Option<usize>,
}

#[async_trait]
impl OrderExecutor for MockExecutor {
    async fn execute(&self, order: &HedgeOrder) -> Result<ExecutionReport> {
        let mut orders = self.orders.lock().unwrap();
        if self.reject_at == Some(orders.len()) {
            return Err(Error::execution("rejected"));
        }
        orders.push((order.side, order.quantity, order.contract.clone()));
        Ok(ExecutionReport::filled(order))
    }
}

/// Long 10 SPY 100 calls (delta 0.5 each), one foreign position, and a chain
/// listing 100/105 strikes.
fn source() -> MockSource {
    let held_call = option("SPY", dec!(100), OptionRight::Call);
    let mut greeks = HashMap::new();
    greeks.insert(held_call.clone(), UnitGreeks::new(dec!(0.5), dec!(0.02)));
    greeks.insert(
        option("SPY", dec!(100), OptionRight::Put),
        UnitGreeks::new(dec!(-0.5), dec!(0.02)),
    );
    greeks.insert(
        option("SPY", dec!(105), OptionRight::Put),
        UnitGreeks::new(dec!(-0.7), dec!(0.015)),
    );
    greeks.insert(
        option("SPY", dec!(105), OptionRight::Call),
        UnitGreeks::new(dec!(0.3), dec!(0.015)),
    );

    MockSource {
        positions: vec![
            HeldPosition::new(
                Contract::from(held_call),
                10,
                Some(UnitGreeks::new(dec!(0.5), dec!(0.02))),
            ),
            HeldPosition::new(Contract::stock("QQQ"), 500, None),
        ],
        universe: ChainUniverse::new("SPY", vec![dec!(100), dec!(105)], vec![expiration()]),
        greeks,
        fail: false,
    }
}

fn hedger(
    source: MockSource,
    registry: RestrictionRegistry,
) -> DeltaHedger<MockSource, MockExecutor> {
    DeltaHedger::new(
        "SPY",
        HedgeParams::default(),
        Arc::new(registry),
        source,
        MockExecutor::default(),
    )
}

#[tokio::test]
async fn test_current_positions_filters_underlying_and_flags_restrictions() {
    let registry = RestrictionRegistry::new();
    registry
        .add_restriction(Some(dec!(100)), None, Some(OptionRight::Call))
        .unwrap();
    let hedger = hedger(source(), registry);

    let positions = hedger.current_positions().await.unwrap();

    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].delta, dec!(5.0));
    assert!(!positions[0].tradable);
    assert_eq!(hedger.portfolio_delta(&positions), dec!(5.0));
}

#[tokio::test]
async fn test_current_positions_stock_and_missing_greeks() {
    let mut source = source();
    source.positions.push(HeldPosition::new(Contract::stock("SPY"), -3, None));
    source.positions.push(HeldPosition::new(
        Contract::from(option("SPY", dec!(110), OptionRight::Put)),
        4,
        None,
    ));
    let hedger = hedger(source, RestrictionRegistry::new());

    let positions = hedger.current_positions().await.unwrap();

    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1].contract, Contract::stock("SPY"));
    assert_eq!(positions[1].delta, dec!(-3));
    assert_eq!(hedger.portfolio_delta(&positions), dec!(2.0));
}

#[tokio::test]
async fn test_options_chain_skips_restricted_and_missing_greeks() {
    let mut source = source();
    source.universe.strikes.push(dec!(110));
    let registry = RestrictionRegistry::new();
    registry
        .add_restriction(Some(dec!(105)), None, Some(OptionRight::Put))
        .unwrap();
    let hedger = hedger(source, registry);

    let chain = hedger.options_chain().await.unwrap();
    let symbols: Vec<String> = chain.iter().map(|c| c.contract.local_symbol()).collect();

    assert_eq!(
        symbols,
        vec![
            "SPY-20240119-100-C",
            "SPY-20240119-100-P",
            "SPY-20240119-105-C"
        ]
    );
}

#[tokio::test]
async fn test_cycle_trims_existing_position() {
    let registry = RestrictionRegistry::new();
    registry.add_restriction(Some(dec!(105)), None, None).unwrap();
    let hedger = hedger(source(), registry);

    let report = hedger.run_cycle().await.unwrap();

    assert_eq!(report.portfolio_delta, dec!(5.0));
    let plan = report.plan.unwrap();
    assert_eq!(plan.outcome, PlanOutcome::Neutralized);
    assert_eq!(report.executions.len(), plan.len());

    // Selling the held calls ties with buying 100 puts; the held position
    // comes first.
    let orders = hedger_orders(&hedger);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].0, Side::Sell);
    assert_eq!(orders[0].1, 10);
}

#[tokio::test]
async fn test_cycle_uses_new_positions_when_position_restricted() {
    let registry = RestrictionRegistry::new();
    registry
        .add_restriction(Some(dec!(100)), None, Some(OptionRight::Call))
        .unwrap();
    let hedger = hedger(source(), registry);

    let report = hedger.run_cycle().await.unwrap();

    let plan = report.plan.unwrap();
    assert!(!plan.is_empty());
    assert!(plan.adjustments.iter().all(|a| a.quantity > 0));
    assert!(
        plan.adjustments
            .iter()
            .all(|a| a.contract.as_option().is_some_and(|o| o.right == OptionRight::Put))
    );
    assert!(plan.residual_delta.abs() < dec!(5.0));
}

#[tokio::test]
async fn test_cycle_within_threshold_does_nothing() {
    let mut source = source();
    source.positions = vec![HeldPosition::new(
        Contract::from(option("SPY", dec!(100), OptionRight::Call)),
        1,
        Some(UnitGreeks::new(dec!(0.01), dec!(0.001))),
    )];
    let hedger = hedger(source, RestrictionRegistry::new());

    let report = hedger.run_cycle().await.unwrap();

    assert!(report.plan.is_none());
    assert!(!report.traded());
}

#[tokio::test]
async fn test_cycle_reports_no_viable_adjustment() {
    let registry = RestrictionRegistry::new();
    registry.add_restriction(None, None, None).unwrap();
    let hedger = hedger(source(), registry);

    let report = hedger.run_cycle().await.unwrap();

    assert_eq!(
        report.plan.as_ref().map(|p| p.outcome),
        Some(PlanOutcome::NoViableAdjustment)
    );
    assert!(!report.traded());
    assert!(hedger_orders(&hedger).is_empty());
}

#[tokio::test]
async fn test_restriction_added_between_cycles() {
    let hedger = hedger(source(), RestrictionRegistry::new());
    hedger
        .add_restriction(Some(dec!(100)), Some("20240119"), None)
        .unwrap();

    let positions = hedger.current_positions().await.unwrap();
    assert!(!positions[0].tradable);
}

#[tokio::test]
async fn test_market_data_failure_propagates() {
    let mut source = source();
    source.fail = true;
    let hedger = hedger(source, RestrictionRegistry::new());

    assert!(matches!(
        hedger.run_cycle().await,
        Err(Error::MarketData(_))
    ));
}

#[tokio::test]
async fn test_execution_failure_stops_remaining_orders() {
    let registry = RestrictionRegistry::new();
    registry
        .add_restriction(Some(dec!(100)), None, Some(OptionRight::Call))
        .unwrap();
    let hedger = DeltaHedger::new(
        "SPY",
        HedgeParams::with_threshold(dec!(0.001)),
        Arc::new(registry),
        source(),
        MockExecutor {
            reject_at: Some(0),
            ..MockExecutor::default()
        },
    );

    assert!(matches!(
        hedger.run_cycle().await,
        Err(Error::Execution(_))
    ));
    assert!(hedger_orders(&hedger).is_empty());
}

#[tokio::test]
async fn test_from_config() {
    let config = HedgeConfig::from_json(
        r#"{
            "underlying": "SPY",
            "delta_threshold": 0.5,
            "restrictions": [{ "strike": 100.0, "right": "Call" }]
        }"#,
    )
    .unwrap();
    let hedger = DeltaHedger::from_config(&config, source(), MockExecutor::default()).unwrap();

    assert_eq!(hedger.underlying(), "SPY");
    assert_eq!(hedger.params().delta_threshold, dec!(0.5));
    assert_eq!(hedger.registry().len(), 1);
    assert!(hedger.needs_hedge(dec!(0.6)));
    assert!(!hedger.needs_hedge(dec!(-0.5)));
}

fn hedger_orders(
    hedger: &DeltaHedger<MockSource, MockExecutor>,
) -> Vec<(Side, u64, Contract)> {
    hedger.executor().orders.lock().unwrap().clone()
}
