//! Integration tests for the adjustment optimizer.

use option_delta_hedger::hedging::{HedgeParams, HedgePlan, PlanOutcome, plan_adjustments};
use option_delta_hedger::portfolio::{
    ChainCandidate, Contract, ExpirationCode, OptionContract, OptionRight, PositionSnapshot,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn option(strike: Decimal, right: OptionRight) -> OptionContract {
    OptionContract::new(
        "SPY",
        strike,
        ExpirationCode::parse("20240119").unwrap(),
        right,
    )
}

/// A mixed book: long stock, long calls, short puts.
fn book() -> Vec<PositionSnapshot> {
    vec![
        PositionSnapshot::new(Contract::stock("SPY"), 3, dec!(3), dec!(0), true),
        PositionSnapshot::new(
            Contract::from(option(dec!(100), OptionRight::Call)),
            10,
            dec!(5.5),
            dec!(0.3),
            true,
        ),
        PositionSnapshot::new(
            Contract::from(option(dec!(95), OptionRight::Put)),
            -8,
            dec!(2.4),
            dec!(-0.16),
            true,
        ),
    ]
}

fn chain() -> Vec<ChainCandidate> {
    vec![
        ChainCandidate::new(option(dec!(105), OptionRight::Call), dec!(0.35), dec!(0.025)),
        ChainCandidate::new(option(dec!(105), OptionRight::Put), dec!(-0.65), dec!(0.025)),
        ChainCandidate::new(option(dec!(90), OptionRight::Put), dec!(-0.12), dec!(0.01)),
        ChainCandidate::new(option(dec!(110), OptionRight::Call), dec!(0.08), dec!(0.008)),
    ]
}

/// Per-unit delta of every contract in the book and chain.
fn unit_deltas() -> HashMap<Contract, Decimal> {
    let mut deltas: HashMap<Contract, Decimal> = book()
        .into_iter()
        .map(|p| (p.contract.clone(), p.delta / Decimal::from(p.quantity)))
        .collect();
    deltas.extend(
        chain()
            .into_iter()
            .map(|c| (Contract::from(c.contract), c.delta)),
    );
    deltas
}

/// Original holdings by contract, and the cap for new positions.
fn limits(params: &HedgeParams) -> HashMap<Contract, u64> {
    let mut limits: HashMap<Contract, u64> = book()
        .into_iter()
        .map(|p| (p.contract, p.quantity.unsigned_abs()))
        .collect();
    limits.extend(
        chain()
            .into_iter()
            .map(|c| (Contract::from(c.contract), params.new_position_cap)),
    );
    limits
}

fn plan(delta: Decimal, params: HedgeParams) -> HedgePlan {
    plan_adjustments(delta, &book(), &chain(), params).unwrap()
}

const DELTAS: [Decimal; 8] = [
    dec!(11.9),
    dec!(4.37),
    dec!(0.9),
    dec!(0.03),
    dec!(-0.5),
    dec!(-3.21),
    dec!(-17),
    dec!(250),
];

#[test]
fn test_imbalance_never_gets_worse() {
    let unit_deltas = unit_deltas();
    for delta in DELTAS {
        let plan = plan(delta, HedgeParams::default());
        let mut portfolio = delta;
        for adjustment in &plan.adjustments {
            let next = portfolio + Decimal::from(adjustment.quantity) * unit_deltas[&adjustment.contract];
            assert!(
                next.abs() <= portfolio.abs(),
                "{adjustment} moved delta from {portfolio} to {next}"
            );
            portfolio = next;
        }
        assert_eq!(portfolio, plan.residual_delta);
    }
}

#[test]
fn test_quantities_within_limits() {
    let params = HedgeParams {
        new_position_cap: 5,
        ..HedgeParams::default()
    };
    let limits = limits(&params);
    for delta in DELTAS {
        let plan = plan(delta, params);
        let mut used: HashMap<&Contract, u64> = HashMap::new();
        for adjustment in &plan.adjustments {
            *used.entry(&adjustment.contract).or_default() += adjustment.size();
        }
        for (contract, total) in used {
            assert!(total <= limits[contract], "{contract} traded {total}");
        }
    }
}

#[test]
fn test_new_positions_used_at_most_once() {
    let chain_contracts: Vec<Contract> = chain()
        .into_iter()
        .map(|c| Contract::from(c.contract))
        .collect();
    for delta in DELTAS {
        let plan = plan(delta, HedgeParams::with_threshold(dec!(0.001)));
        for contract in &chain_contracts {
            let uses = plan
                .adjustments
                .iter()
                .filter(|a| &a.contract == contract)
                .count();
            assert!(uses <= 1, "{contract} used {uses} times");
        }
    }
}

#[test]
fn test_iterations_bounded_by_candidates() {
    let candidate_count = book().len() + chain().len();
    for delta in DELTAS {
        for threshold in [dec!(0.02), dec!(0), dec!(-1)] {
            let plan = plan(delta, HedgeParams::with_threshold(threshold));
            assert!(plan.iterations <= candidate_count);
            assert_eq!(plan.iterations, plan.adjustments.len());
        }
    }
}

#[test]
fn test_outcomes_are_consistent() {
    let params = HedgeParams::default();
    for delta in DELTAS {
        let plan = plan(delta, params);
        match plan.outcome {
            PlanOutcome::AlreadyWithinThreshold => {
                assert!(plan.is_empty());
                assert!(!params.exceeds_threshold(delta));
            }
            PlanOutcome::Neutralized => {
                assert!(!plan.is_empty());
                assert!(!params.exceeds_threshold(plan.residual_delta));
            }
            PlanOutcome::Partial => {
                assert!(!plan.is_empty());
                assert!(params.exceeds_threshold(plan.residual_delta));
            }
            PlanOutcome::NoViableAdjustment => {
                assert!(plan.is_empty());
                assert_eq!(plan.residual_delta, delta);
            }
        }
    }
}

#[test]
fn test_single_reduce_scenario() {
    let contract = Contract::from(option(dec!(100), OptionRight::Call));
    let position = PositionSnapshot::new(contract.clone(), 10, dec!(0.5), dec!(0.1), true);

    let plan = plan_adjustments(
        dec!(0.30),
        &[position],
        &[],
        HedgeParams::with_threshold(dec!(0.02)),
    )
    .unwrap();

    assert_eq!(plan.adjustments.len(), 1);
    assert_eq!(plan.adjustments[0].contract, contract);
    assert_eq!(plan.adjustments[0].quantity, -6);
    assert!(plan.residual_delta.is_zero());
    assert_eq!(plan.iterations, 1);
}

#[test]
fn test_no_candidates_scenario() {
    let plan = plan_adjustments(dec!(1.5), &[], &[], HedgeParams::default()).unwrap();

    assert!(plan.adjustments.is_empty());
    assert_eq!(plan.outcome, PlanOutcome::NoViableAdjustment);
}

#[test]
fn test_short_put_is_bought_back_when_delta_is_short() {
    // Short puts carry positive delta; buying them back lowers it.
    let put = Contract::from(option(dec!(95), OptionRight::Put));
    let position = PositionSnapshot::new(put.clone(), -8, dec!(2.4), dec!(-0.16), true);

    let plan = plan_adjustments(dec!(0.9), &[position], &[], HedgeParams::default()).unwrap();

    assert_eq!(plan.adjustments, vec![option_delta_hedger::hedging::Adjustment::new(put, 3)]);
    assert_eq!(plan.residual_delta, dec!(0));
}

#[test]
fn test_inputs_are_not_mutated() {
    let positions = book();
    let chain = chain();
    let before = (positions.clone(), chain.clone());

    let _ = plan_adjustments(dec!(11.9), &positions, &chain, HedgeParams::default()).unwrap();

    assert_eq!((positions, chain), before);
}
