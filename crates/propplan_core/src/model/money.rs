//! Fixed-point currency
//!
//! Every balance the simulator carries across periods is stored as whole
//! cents so that repeated accrual over a long horizon cannot drift. Rates and
//! growth factors stay `f64`; the product is rounded back to cents at the
//! point it enters the ledger. Arithmetic saturates at the ends of the
//! `i64` range instead of wrapping or panicking.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Signed amount of money in integer cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Convert a dollar amount, rounding half away from zero to the nearest cent.
    ///
    /// Non-finite input saturates (NaN becomes zero); callers validate
    /// configuration before converting.
    #[must_use]
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a real factor, rounding to the nearest cent
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Money((self.0 as f64 * factor).round() as i64)
    }

    /// Apply a percentage such as `20.0` for 20%
    #[must_use]
    pub fn percent(self, percent: f64) -> Self {
        self.scale(percent / 100.0)
    }

    /// Clamp negative amounts to zero
    #[must_use]
    pub fn non_negative(self) -> Self {
        self.max(Money::ZERO)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Money(self.0.saturating_abs())
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Round up to the next multiple of `step` (no-op for a non-positive step)
    #[must_use]
    pub fn round_up_to(self, step: Money) -> Self {
        if step.0 <= 0 {
            return self;
        }
        let rem = self.0.rem_euclid(step.0);
        if rem == 0 {
            self
        } else {
            Money((self.0 - rem).saturating_add(step.0))
        }
    }

    /// `self / other`, or 0 when `other` is zero
    #[must_use]
    pub fn ratio(self, other: Money) -> f64 {
        if other.0 == 0 {
            0.0
        } else {
            self.0 as f64 / other.0 as f64
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars_rounds_to_cents() {
        assert_eq!(Money::from_dollars(12.345).cents(), 1235);
        assert_eq!(Money::from_dollars(-0.004).cents(), 0);
        assert_eq!(Money::from_dollars(350_000.0).cents(), 35_000_000);
        assert_eq!(Money::from_dollars(f64::NAN), Money::ZERO);
    }

    #[test]
    fn test_percent_and_scale() {
        let cost = Money::from_dollars(350_000.0);
        assert_eq!(cost.percent(20.0), Money::from_dollars(70_000.0));
        assert_eq!(cost.scale(0.5), Money::from_dollars(175_000.0));
    }

    #[test]
    fn test_round_up_to_step() {
        let step = Money::from_dollars(1_000.0);
        assert_eq!(
            Money::from_dollars(12_000.01).round_up_to(step),
            Money::from_dollars(13_000.0)
        );
        assert_eq!(
            Money::from_dollars(13_000.0).round_up_to(step),
            Money::from_dollars(13_000.0)
        );
        assert_eq!(Money::from_dollars(1.0).round_up_to(Money::ZERO), Money::from_dollars(1.0));
    }

    #[test]
    fn test_ratio_with_zero_denominator() {
        assert_eq!(Money::from_dollars(10.0).ratio(Money::ZERO), 0.0);
        assert_eq!(Money::from_dollars(10.0).ratio(Money::from_dollars(40.0)), 0.25);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_sum_and_ops() {
        let values = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_cents(350));

        let mut running = total;
        running -= Money::from_cents(400);
        assert!(running.is_negative());
        assert_eq!(running.non_negative(), Money::ZERO);
        assert_eq!(-running, Money::from_cents(50));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);
        let sum: Money = [max, max, max].iter().sum();
        assert_eq!(sum, max);

        assert_eq!(max.round_up_to(Money::from_cents(1_000)), max);
        assert_eq!(max.scale(4.0), max);
    }
}
