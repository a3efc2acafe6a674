//! Property tests for the retention calculation

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_payment::{calculate_retention, net_value};

fn money_strategy() -> impl Strategy<Value = Money> {
    // Invoice totals up to one million, in whole cents
    (0i64..=100_000_000).prop_map(Money::from_cents)
}

fn percent_strategy() -> impl Strategy<Value = Decimal> {
    // Percentages in [0, 100] with two decimal places
    (0i64..=10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

proptest! {
    #[test]
    fn retention_plus_net_equals_total(total in money_strategy(), pct in percent_strategy()) {
        let retention = calculate_retention(total, pct);
        let net = net_value(total, retention);
        prop_assert_eq!(retention + net, total);
    }

    #[test]
    fn retention_matches_percentage_formula(total in money_strategy(), pct in percent_strategy()) {
        let retention = calculate_retention(total, pct);
        let expected = Money::new(total.amount() * pct / dec!(100));
        prop_assert_eq!(retention, expected);
    }

    #[test]
    fn retention_never_exceeds_total(total in money_strategy(), pct in percent_strategy()) {
        let retention = calculate_retention(total, pct);
        prop_assert!(retention <= total);
        prop_assert!(!retention.is_negative());
    }

    #[test]
    fn retention_is_monotone_in_percentage(total in money_strategy(), pct in percent_strategy()) {
        let lower = calculate_retention(total, pct);
        let higher = calculate_retention(total, pct + dec!(0.5));
        prop_assert!(lower <= higher);
    }
}
