//! Withholding-tax (retention) calculation
//!
//! Pure functions, no failure modes. The percentage is expected in
//! [0, 100]; enforcing that range is the caller's responsibility
//! (`domain_party::validate_retention_percent` at the edge), and
//! out-of-range values produce out-of-range results without clamping.

use rust_decimal::Decimal;

use core_kernel::Money;

/// Computes the withheld amount: `total_value × retention_percent / 100`
///
/// The result carries the usual two-decimal monetary precision.
///
/// ```
/// use core_kernel::Money;
/// use domain_payment::calculate_retention;
/// use rust_decimal_macros::dec;
///
/// let retention = calculate_retention(Money::new(dec!(1000.00)), dec!(10));
/// assert_eq!(retention, Money::new(dec!(100.00)));
/// ```
pub fn calculate_retention(total_value: Money, retention_percent: Decimal) -> Money {
    total_value.percent(retention_percent)
}

/// Computes the net disbursement: `total_value − retention_value`
pub fn net_value(total_value: Money, retention_value: Money) -> Money {
    total_value - retention_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ten_percent_of_one_thousand() {
        let total = Money::new(dec!(1000.00));
        let retention = calculate_retention(total, dec!(10));
        assert_eq!(retention, Money::new(dec!(100.00)));
        assert_eq!(net_value(total, retention), Money::new(dec!(900.00)));
    }

    #[test]
    fn test_zero_percent_withholds_nothing() {
        let total = Money::new(dec!(123.45));
        assert_eq!(calculate_retention(total, dec!(0)), Money::zero());
        assert_eq!(net_value(total, Money::zero()), total);
    }

    #[test]
    fn test_fractional_percent_rounds_to_cents() {
        // 4.65% of 1234.56 = 57.40704 -> 57.41
        let retention = calculate_retention(Money::new(dec!(1234.56)), dec!(4.65));
        assert_eq!(retention, Money::new(dec!(57.41)));
    }

    #[test]
    fn test_full_retention() {
        let total = Money::new(dec!(88.00));
        let retention = calculate_retention(total, dec!(100));
        assert_eq!(retention, total);
        assert!(net_value(total, retention).is_zero());
    }

    #[test]
    fn test_no_clamping_outside_range() {
        // Out-of-range input produces out-of-range output, as specified
        let total = Money::new(dec!(100.00));
        assert_eq!(calculate_retention(total, dec!(150)), Money::new(dec!(150.00)));
        assert!(calculate_retention(total, dec!(-10)).is_negative());
    }
}
