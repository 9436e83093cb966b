//! Property-based tests for the numeric entity family.
//!
//! Random operation sequences against each entity, checking that the
//! bounding invariants hold at every step.

use proptest::prelude::*;
use tally_entity::{AccumInt, FilledInt, SpendingInt};

// ===========================================================================
// Operation generators
// ===========================================================================

#[derive(Debug, Clone)]
enum AccumOp {
    Add(i32),
    Spend(i32),
}

fn arb_accum_ops(max_ops: usize) -> impl Strategy<Value = Vec<AccumOp>> {
    proptest::collection::vec(
        prop_oneof![
            (0..1000i32).prop_map(AccumOp::Add),
            (0..1000i32).prop_map(AccumOp::Spend),
        ],
        0..max_ops,
    )
}

#[derive(Debug, Clone)]
enum SpendingOp {
    Spend(i32),
    Restore(i32),
    RestoreFull,
    RemoveExcess,
    Resize(i32),
}

fn arb_spending_ops(max_ops: usize) -> impl Strategy<Value = Vec<SpendingOp>> {
    proptest::collection::vec(
        prop_oneof![
            (0..500i32).prop_map(SpendingOp::Spend),
            (0..500i32).prop_map(SpendingOp::Restore),
            Just(SpendingOp::RestoreFull),
            Just(SpendingOp::RemoveExcess),
            (0..500i32).prop_map(SpendingOp::Resize),
        ],
        0..max_ops,
    )
}

proptest! {
    #[test]
    fn accum_spent_never_exceeds_got(ops in arb_accum_ops(64)) {
        let mut counter = AccumInt::new();
        for op in ops {
            match op {
                AccumOp::Add(v) => counter.add(v).unwrap(),
                AccumOp::Spend(v) => {
                    let before = counter.value();
                    let applied = counter.spend(v).unwrap();
                    // A refused spend leaves the balance untouched.
                    prop_assert_eq!(applied, v <= before);
                    if !applied {
                        prop_assert_eq!(counter.value(), before);
                    }
                }
            }
            prop_assert!(counter.spent() <= counter.got());
            prop_assert!(counter.value() >= 0);
            prop_assert_eq!(counter.value(), counter.got() - counter.spent());
        }
    }

    #[test]
    fn spending_balance_never_exceeds_capacity(
        capacity in 0..500i32,
        ops in arb_spending_ops(64),
    ) {
        let mut balance = SpendingInt::new(capacity).unwrap();
        for op in ops {
            match op {
                SpendingOp::Spend(v) => balance.spend(v).unwrap(),
                SpendingOp::Restore(v) => balance.restore(v).unwrap(),
                SpendingOp::RestoreFull => balance.restore_full(),
                SpendingOp::RemoveExcess => {
                    let deficit = balance.remove_excess();
                    prop_assert!(deficit >= 0);
                    prop_assert!(balance.cur_value() >= 0);
                }
                SpendingOp::Resize(c) => balance.resize_capacity(c).unwrap(),
            }
            prop_assert!(balance.cur_value() <= balance.capacity());
            prop_assert_eq!(
                balance.is_full(),
                balance.cur_value() >= balance.capacity()
            );
        }
    }

    #[test]
    fn filled_progress_stays_within_threshold(
        threshold in 0..500i32,
        amounts in proptest::collection::vec(0..200i32, 0..64),
    ) {
        let mut gauge = FilledInt::new(threshold).unwrap();
        let mut poured = 0i64;
        let mut spilled = 0i64;
        for amount in amounts {
            poured += i64::from(amount);
            spilled += i64::from(gauge.fill(amount).unwrap());

            prop_assert!(gauge.filler() >= 0);
            prop_assert!(gauge.filler() <= gauge.threshold());
            prop_assert_eq!(gauge.is_filled(), gauge.shortfall() == 0);
            let ratio = gauge.ratio();
            prop_assert!((0.0..=1.0).contains(&ratio));
        }
        // Conservation: everything poured is either held or reported back.
        prop_assert_eq!(poured, i64::from(gauge.filler()) + spilled);
    }
}
