//! Investor profile and growth assumptions

use serde::{Deserialize, Serialize};

use crate::error::{Result, check_amount, check_rate};

/// Simulation periods per calendar year (half-year ticks)
pub const PERIODS_PER_YEAR: u32 = 2;

/// Longest horizon the engine accepts
pub const MAX_TIMELINE_YEARS: u32 = 50;

/// Most purchases the simulator will commit in a single period
pub const MAX_PURCHASES_PER_PERIOD: u32 = 100;

/// Tiered annual growth curve, each tier an annual percentage (e.g. `12.5`)
///
/// Tiers are measured from the moment a value starts compounding: year 1,
/// years 2 and 3, year 4, then year 5 onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthCurve {
    pub year1: f64,
    pub years2to3: f64,
    pub year4: f64,
    pub year5plus: f64,
}

impl Default for GrowthCurve {
    fn default() -> Self {
        Self {
            year1: 12.5,
            years2to3: 10.0,
            year4: 7.5,
            year5plus: 6.0,
        }
    }
}

impl GrowthCurve {
    /// A curve that grows at the same annual rate in every tier
    #[must_use]
    pub fn flat(annual_percent: f64) -> Self {
        Self {
            year1: annual_percent,
            years2to3: annual_percent,
            year4: annual_percent,
            year5plus: annual_percent,
        }
    }

    /// Replace the long-run tier, keeping the early-cycle tiers
    #[must_use]
    pub fn with_long_run(self, annual_percent: f64) -> Self {
        Self {
            year5plus: annual_percent,
            ..self
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_rate("growth_curve.year1", self.year1, -99.0, 100.0)?;
        check_rate("growth_curve.years2to3", self.years2to3, -99.0, 100.0)?;
        check_rate("growth_curve.year4", self.year4, -99.0, 100.0)?;
        check_rate("growth_curve.year5plus", self.year5plus, -99.0, 100.0)
    }
}

/// Immutable description of the investor for one run
///
/// Dollar fields are plain `f64` as entered by the user; [`InvestmentProfile::validate`]
/// rejects negative and non-finite values before the simulator converts them to
/// [`Money`](crate::model::Money).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentProfile {
    // === Starting position ===
    /// Cash set aside for deposits at the start of the plan
    pub deposit_pool: f64,
    /// Lender-assessed maximum total debt
    pub borrowing_capacity: f64,
    /// Value of property already owned
    pub current_portfolio_value: f64,
    /// Debt already held against the existing portfolio
    pub current_debt: f64,

    // === Plan ===
    pub annual_savings: f64,
    pub timeline_years: u32,
    pub growth_curve: GrowthCurve,
    /// Share of extractable equity a lender will release (0..=1)
    pub equity_factor: f64,
    /// Cash that must remain after paying a deposit
    pub deposit_buffer: f64,
    pub max_purchases_per_period: u32,
    /// Labels period rows; never read from a clock
    pub start_date: jiff::civil::Date,

    // === Serviceability ===
    /// Share of assessed salary available for debt service (0..=1)
    pub serviceability_ratio: f64,
    pub base_salary: f64,
    pub salary_serviceability_multiplier: f64,
    /// Share of gross rent a lender counts as income (0..=1)
    pub rent_factor: f64,
    pub interest_rate_percent: f64,
    /// Holding expenses as a percentage of gross rent
    pub expense_ratio_percent: f64,
}

impl Default for InvestmentProfile {
    fn default() -> Self {
        Self {
            deposit_pool: 50_000.0,
            borrowing_capacity: 500_000.0,
            current_portfolio_value: 0.0,
            current_debt: 0.0,
            annual_savings: 24_000.0,
            timeline_years: 15,
            growth_curve: GrowthCurve::default(),
            equity_factor: 0.75,
            deposit_buffer: 5_000.0,
            max_purchases_per_period: 1,
            start_date: jiff::civil::date(2025, 1, 1),
            serviceability_ratio: 0.40,
            base_salary: 60_000.0,
            salary_serviceability_multiplier: 1.0,
            rent_factor: 0.75,
            interest_rate_percent: 6.5,
            expense_ratio_percent: 30.0,
        }
    }
}

impl InvestmentProfile {
    /// Total number of periods in the horizon
    #[must_use]
    pub fn total_periods(&self) -> u32 {
        self.timeline_years.saturating_mul(PERIODS_PER_YEAR)
    }

    /// Reject configurations the simulator cannot run
    pub fn validate(&self) -> Result<()> {
        if self.timeline_years > MAX_TIMELINE_YEARS {
            return Err(crate::error::ConfigError::InvalidHorizon {
                years: self.timeline_years,
                max: MAX_TIMELINE_YEARS,
            });
        }
        if self.max_purchases_per_period == 0 {
            return Err(crate::error::ConfigError::ZeroPurchaseLimit);
        }
        if self.max_purchases_per_period > MAX_PURCHASES_PER_PERIOD {
            return Err(crate::error::ConfigError::ExcessivePurchaseLimit {
                value: self.max_purchases_per_period,
                max: MAX_PURCHASES_PER_PERIOD,
            });
        }

        check_amount("deposit_pool", self.deposit_pool)?;
        check_amount("borrowing_capacity", self.borrowing_capacity)?;
        check_amount("current_portfolio_value", self.current_portfolio_value)?;
        check_amount("current_debt", self.current_debt)?;
        check_amount("annual_savings", self.annual_savings)?;
        check_amount("deposit_buffer", self.deposit_buffer)?;
        check_amount("base_salary", self.base_salary)?;
        check_amount(
            "salary_serviceability_multiplier",
            self.salary_serviceability_multiplier,
        )?;

        check_rate("equity_factor", self.equity_factor, 0.0, 1.0)?;
        check_rate("serviceability_ratio", self.serviceability_ratio, 0.0, 1.0)?;
        check_rate("rent_factor", self.rent_factor, 0.0, 1.0)?;
        check_rate("interest_rate_percent", self.interest_rate_percent, 0.0, 100.0)?;
        check_rate("expense_ratio_percent", self.expense_ratio_percent, 0.0, 100.0)?;

        self.growth_curve.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = InvestmentProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.total_periods(), 30);
    }

    #[test]
    fn test_validate_rejects_long_horizon() {
        let profile = InvestmentProfile {
            timeline_years: MAX_TIMELINE_YEARS + 1,
            ..Default::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ConfigError::InvalidHorizon {
                years: MAX_TIMELINE_YEARS + 1,
                max: MAX_TIMELINE_YEARS
            })
        );
    }

    #[test]
    fn test_validate_accepts_zero_horizon() {
        let profile = InvestmentProfile {
            timeline_years: 0,
            ..Default::default()
        };
        assert!(profile.validate().is_ok());
        assert_eq!(profile.total_periods(), 0);
    }

    #[test]
    fn test_validate_rejects_nan_savings() {
        let profile = InvestmentProfile {
            annual_savings: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidAmount {
                field: "annual_savings",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_bounds_purchase_limit() {
        let at_cap = InvestmentProfile {
            max_purchases_per_period: MAX_PURCHASES_PER_PERIOD,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let unbounded = InvestmentProfile {
            max_purchases_per_period: u32::MAX,
            ..Default::default()
        };
        assert_eq!(
            unbounded.validate(),
            Err(ConfigError::ExcessivePurchaseLimit {
                value: u32::MAX,
                max: MAX_PURCHASES_PER_PERIOD
            })
        );
    }

    #[test]
    fn test_validate_rejects_oversized_pool() {
        let profile = InvestmentProfile {
            deposit_pool: 1.0e17,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::AmountTooLarge {
                field: "deposit_pool",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_ratio() {
        let profile = InvestmentProfile {
            rent_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidRate {
                field: "rent_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_with_long_run_keeps_early_tiers() {
        let curve = GrowthCurve::default().with_long_run(4.0);
        assert_eq!(curve.year1, 12.5);
        assert_eq!(curve.years2to3, 10.0);
        assert_eq!(curve.year4, 7.5);
        assert_eq!(curve.year5plus, 4.0);
    }
}
