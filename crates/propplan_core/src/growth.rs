//! Tiered capital growth
//!
//! Values compound one period at a time. The annual rate for each period is
//! taken from the tier the period falls in, counted from when the value
//! started compounding:
//!
//! | periods | tier        |
//! |---------|-------------|
//! | 1–2     | `year1`     |
//! | 3–6     | `years2to3` |
//! | 7–8     | `year4`     |
//! | 9+      | `year5plus` |
//!
//! Annual rates become per-period rates geometrically, so two periods at a
//! tier's rate equal exactly one year at that rate.

use crate::model::{GrowthCurve, Money, PERIODS_PER_YEAR};

/// Annual percentage that applies to the `period`-th elapsed period (1-based)
#[must_use]
pub fn tier_rate(curve: &GrowthCurve, period: u32) -> f64 {
    match period {
        0..=2 => curve.year1,
        3..=6 => curve.years2to3,
        7..=8 => curve.year4,
        _ => curve.year5plus,
    }
}

/// Convert an annual percentage to the equivalent compound per-period rate
#[must_use]
pub fn per_period_rate(annual_percent: f64) -> f64 {
    (1.0 + annual_percent / 100.0).powf(1.0 / f64::from(PERIODS_PER_YEAR)) - 1.0
}

/// Cumulative growth multiplier after `periods_elapsed` periods
#[must_use]
pub fn growth_factor(periods_elapsed: u32, curve: &GrowthCurve) -> f64 {
    (1..=periods_elapsed)
        .map(|p| 1.0 + per_period_rate(tier_rate(curve, p)))
        .product()
}

/// Compound `value` forward `periods_elapsed` periods along `curve`
#[must_use]
pub fn compound(value: f64, periods_elapsed: u32, curve: &GrowthCurve) -> f64 {
    value * growth_factor(periods_elapsed, curve)
}

/// [`compound`] for ledger amounts, rounded to the cent
#[must_use]
pub fn compound_money(value: Money, periods_elapsed: u32, curve: &GrowthCurve) -> Money {
    value.scale(growth_factor(periods_elapsed, curve))
}
