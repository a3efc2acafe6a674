//! Money with precise decimal arithmetic
//!
//! The payables system deals with a single currency (BRL), so `Money` wraps a
//! `Decimal` normalised to two fractional digits rather than carrying a
//! currency code on every value. All arithmetic is exact; floating point is
//! never involved.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount, stored with exactly two decimal places
///
/// Construction rounds to two fractional digits using banker's rounding
/// (midpoint to even), which keeps repeated percentage calculations from
/// drifting upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value, rounding to two decimal places
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointNearestEven))
    }

    /// Creates Money from an integer number of cents
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiplies by a scalar factor (e.g., a rate), rounding the result
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }

    /// Applies a percentage in [0, 100] to this amount
    ///
    /// `Money::new(dec!(1000)).percent(dec!(10))` is `100.00`. Out-of-range
    /// percentages are not clamped; validating the input is the caller's
    /// concern.
    pub fn percent(&self, percent: Decimal) -> Self {
        Self::new(self.0 * percent / dec!(100))
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.0 / divisor))
    }

    /// Validates that this amount is zero or positive
    pub fn ensure_non_negative(&self) -> Result<Self, MoneyError> {
        if self.is_negative() {
            return Err(MoneyError::NegativeAmount(self.0));
        }
        Ok(*self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Money::new)
            .map_err(|e| MoneyError::InvalidAmount(format!("{s}: {e}")))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
