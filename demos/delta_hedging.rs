//! Delta Hedging Example
//!
//! This example demonstrates a full monitoring cycle:
//! - Loading the hedger configuration from JSON
//! - Restricting contracts by strike, expiration and right
//! - Planning gamma-aware adjustments when delta leaves the band
//! - Executing the plan against an in-memory broker
//!
//! Run with: `cargo run --example delta_hedging`

use async_trait::async_trait;
use option_delta_hedger::config::HedgeConfig;
use option_delta_hedger::hedging::{
    DeltaHedger, ExecutionReport, HedgeOrder, HeldPosition, MarketDataSource, OrderExecutor,
};
use option_delta_hedger::portfolio::{
    ChainUniverse, Contract, ExpirationCode, OptionContract, OptionRight, UnitGreeks,
};
use option_delta_hedger::{Error, Result};
use orderbook_rs::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

const CONFIG: &str = r#"{
    "underlying": "SPY",
    "delta_threshold": 0.5,
    "new_position_cap": 20,
    "restrictions": [
        { "strike": 445.0, "right": "Put" },
        { "expiration": "20240216", "right": "Call" }
    ]
}"#;

/// Shared paper account: holdings, greeks and the listed chain.
struct PaperBook {
    holdings: Mutex<HashMap<Contract, i64>>,
    greeks: HashMap<OptionContract, UnitGreeks>,
    universe: ChainUniverse,
}

impl PaperBook {
    fn new() -> Self {
        let expirations: Vec<ExpirationCode> = ["20240119", "20240216"]
            .iter()
            .filter_map(|code| ExpirationCode::parse(*code).ok())
            .collect();
        let strikes = vec![dec!(440), dec!(445), dec!(450), dec!(455), dec!(460)];
        let universe = ChainUniverse::new("SPY", strikes.clone(), expirations.clone());

        // Rough linear greeks around spot 450.
        let mut greeks = HashMap::new();
        for expiration in &expirations {
            for strike in &strikes {
                let moneyness = (dec!(450) - strike) / dec!(40);
                let call_delta = (dec!(0.5) + moneyness).clamp(dec!(0.05), dec!(0.95));
                let gamma = dec!(0.02) - (dec!(450) - strike).abs() / dec!(1000);
                for right in OptionRight::ALL {
                    let delta = match right {
                        OptionRight::Call => call_delta,
                        OptionRight::Put => call_delta - Decimal::ONE,
                    };
                    let contract = OptionContract::new("SPY", *strike, expiration.clone(), right);
                    greeks.insert(contract, UnitGreeks::new(delta, gamma));
                }
            }
        }

        let near = expirations[0].clone();
        let mut holdings = HashMap::new();
        holdings.insert(
            Contract::from(OptionContract::new("SPY", dec!(450), near.clone(), OptionRight::Call)),
            20,
        );
        holdings.insert(
            Contract::from(OptionContract::new("SPY", dec!(445), near, OptionRight::Put)),
            -10,
        );
        holdings.insert(Contract::stock("SPY"), -5);

        Self {
            holdings: Mutex::new(holdings),
            greeks,
            universe,
        }
    }
}

/// Market data view of the paper book.
struct PaperFeed(Arc<PaperBook>);

#[async_trait]
impl MarketDataSource for PaperFeed {
    async fn positions(&self) -> Result<Vec<HeldPosition>> {
        let holdings = self
            .0
            .holdings
            .lock()
            .map_err(|e| Error::market_data(e.to_string()))?;
        Ok(holdings
            .iter()
            .filter(|(_, quantity)| **quantity != 0)
            .map(|(contract, quantity)| {
                let greeks = contract
                    .as_option()
                    .and_then(|option| self.0.greeks.get(option).copied());
                HeldPosition::new(contract.clone(), *quantity, greeks)
            })
            .collect())
    }

    async fn chain_universe(&self, _underlying: &str) -> Result<ChainUniverse> {
        Ok(self.0.universe.clone())
    }

    async fn option_greeks(&self, contract: &OptionContract) -> Result<Option<UnitGreeks>> {
        Ok(self.0.greeks.get(contract).copied())
    }
}

/// Fills every order in full against the paper book.
struct PaperExecutor(Arc<PaperBook>);

#[async_trait]
impl OrderExecutor for PaperExecutor {
    async fn execute(&self, order: &HedgeOrder) -> Result<ExecutionReport> {
        let mut holdings = self
            .0
            .holdings
            .lock()
            .map_err(|e| Error::execution(e.to_string()))?;
        let size = i64::try_from(order.quantity)
            .map_err(|_| Error::execution(format!("order too large: {order}")))?;
        let signed = match order.side {
            Side::Buy => size,
            Side::Sell => -size,
        };
        *holdings.entry(order.contract.clone()).or_insert(0) += signed;
        Ok(ExecutionReport::filled(order))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== Delta Hedging Example ===");

    let config = HedgeConfig::from_json(CONFIG)?;
    info!("Hedge Configuration:");
    info!("  Underlying: {}", config.underlying);
    info!("  Delta threshold: {}", config.delta_threshold);
    info!("  New position cap: {}", config.new_position_cap);

    let book = Arc::new(PaperBook::new());
    let hedger = DeltaHedger::from_config(
        &config,
        PaperFeed(Arc::clone(&book)),
        PaperExecutor(Arc::clone(&book)),
    )?;
    info!("Restrictions:\n{}", hedger.registry());

    // Cycle 1: the book is long delta, so the hedger trades
    info!("\n--- Cycle 1: Delta Outside Band ---");
    let report = hedger.run_cycle().await?;
    info!("Portfolio delta: {}", report.portfolio_delta);
    if let Some(plan) = &report.plan {
        info!("Plan: {}", plan);
        for adjustment in &plan.adjustments {
            info!("  {}", adjustment);
        }
    }
    info!("Orders filled: {}", report.executions.len());

    // Cycle 2: residual delta after the fills
    info!("\n--- Cycle 2: After Adjustments ---");
    let report = hedger.run_cycle().await?;
    info!("Portfolio delta: {}", report.portfolio_delta);
    info!("Needs hedge: {}", hedger.needs_hedge(report.portfolio_delta));

    // Cycle 3: a new restriction takes effect from the next cycle on
    info!("\n--- Cycle 3: New Restriction ---");
    hedger.add_restriction(Some(dec!(450)), None, None)?;
    let positions = hedger.current_positions().await?;
    for position in &positions {
        info!(
            "  {} qty={} delta={} tradable={}",
            position.contract, position.quantity, position.delta, position.tradable
        );
    }
    let chain = hedger.options_chain().await?;
    info!("Allowed chain entries with greeks: {}", chain.len());

    info!("\n=== Example Complete ===");
    Ok(())
}
