use crate::affordability::extractable_equity;
use crate::growth::compound_money;
use crate::model::{
    AcquisitionSlot, CashflowBreakdown, DepositFunding, GrowthCurve, InvestmentProfile, Money,
    PERIODS_PER_YEAR, PortfolioSnapshot, PropertyTypeId,
};

/// A property bought during the run
///
/// Never mutated after purchase; its value at any later period is recomputed
/// from the original cost.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedProperty {
    pub sequence: usize,
    pub property_type: PropertyTypeId,
    pub purchase_period: u32,
    pub original_cost: Money,
    pub loan_amount: Money,
    pub deposit_paid: Money,
    pub yield_percent: f64,
    pub growth_curve: GrowthCurve,
}

impl OwnedProperty {
    #[must_use]
    pub fn value_at(&self, period: u32) -> Money {
        let elapsed = period.saturating_sub(self.purchase_period);
        compound_money(self.original_cost, elapsed, &self.growth_curve)
    }

    #[must_use]
    pub fn annual_rent_at(&self, period: u32) -> Money {
        self.value_at(period).percent(self.yield_percent)
    }
}

/// Mutable portfolio position for one run
///
/// Created from the profile at period 0 and advanced one period at a time.
/// Nothing here outlives the run that owns it.
#[derive(Debug, Clone)]
pub struct PortfolioState {
    pub current_period: u32,
    /// Remaining starting deposit pool
    pub cash_on_hand: Money,
    pub cumulative_debt: Money,
    pub properties: Vec<OwnedProperty>,
    /// Savings accrued and not yet spent on deposits
    pub savings_accrued: Money,
    /// Net cashflow to date less what deposits drew from it
    pub net_cashflow_to_date: Money,
    /// Net cashflow to date, unaffected by deposits
    pub cumulative_net_cashflow: Money,

    existing_portfolio: Money,
    profile_curve: GrowthCurve,
    savings_per_period: Money,
    interest_rate_percent: f64,
    expense_ratio_percent: f64,
    equity_factor: f64,

    portfolio_value: Money,
    annual_gross_rent: Money,
}

impl PortfolioState {
    #[must_use]
    pub fn from_profile(profile: &InvestmentProfile) -> Self {
        let existing_portfolio = Money::from_dollars(profile.current_portfolio_value);
        Self {
            current_period: 0,
            cash_on_hand: Money::from_dollars(profile.deposit_pool),
            cumulative_debt: Money::from_dollars(profile.current_debt),
            properties: Vec::new(),
            savings_accrued: Money::ZERO,
            net_cashflow_to_date: Money::ZERO,
            cumulative_net_cashflow: Money::ZERO,
            existing_portfolio,
            profile_curve: profile.growth_curve,
            savings_per_period: Money::from_dollars(profile.annual_savings)
                .scale(1.0 / f64::from(PERIODS_PER_YEAR)),
            interest_rate_percent: profile.interest_rate_percent,
            expense_ratio_percent: profile.expense_ratio_percent,
            equity_factor: profile.equity_factor,
            portfolio_value: existing_portfolio,
            annual_gross_rent: Money::ZERO,
        }
    }

    #[must_use]
    pub fn portfolio_value(&self) -> Money {
        self.portfolio_value
    }

    #[must_use]
    pub fn annual_gross_rent(&self) -> Money {
        self.annual_gross_rent
    }

    #[must_use]
    pub fn equity(&self) -> Money {
        self.portfolio_value - self.cumulative_debt
    }

    /// Move to the next period: accrue savings, regrow values and book the
    /// period's rental cashflow
    pub fn advance(&mut self) -> CashflowBreakdown {
        self.current_period += 1;
        self.savings_accrued += self.savings_per_period;
        self.revalue();

        let periods = f64::from(PERIODS_PER_YEAR);
        let gross_rental = self.annual_gross_rent.scale(1.0 / periods);
        let loan_interest = self
            .cumulative_debt
            .percent(self.interest_rate_percent)
            .scale(1.0 / periods);
        let expenses = gross_rental.percent(self.expense_ratio_percent);
        let net = gross_rental - loan_interest - expenses;

        self.net_cashflow_to_date += net;
        self.cumulative_net_cashflow += net;

        CashflowBreakdown {
            gross_rental,
            loan_interest,
            expenses,
            net,
        }
    }

    /// Recompute portfolio value and annual rent for the current period
    fn revalue(&mut self) {
        let period = self.current_period;
        let owned: Money = self.properties.iter().map(|p| p.value_at(period)).sum();
        self.portfolio_value =
            compound_money(self.existing_portfolio, period, &self.profile_curve) + owned;
        self.annual_gross_rent = self.properties.iter().map(|p| p.annual_rent_at(period)).sum();
    }

    /// Record a purchase in the current period
    ///
    /// The deposit comes out of the starting pool first, then savings, then
    /// positive cashflow. Whatever is left is drawn notionally against equity
    /// and not deducted from any balance. The new holding is appended to
    /// [`properties`](Self::properties).
    pub fn commit(&mut self, slot: &AcquisitionSlot) -> DepositFunding {
        let deposit = slot.deposit();
        let mut remaining = deposit;

        let from_cash = take(&mut self.cash_on_hand, &mut remaining);
        let from_savings = take(&mut self.savings_accrued, &mut remaining);
        let from_cashflow = take(&mut self.net_cashflow_to_date, &mut remaining);
        let funding = DepositFunding {
            from_cash,
            from_savings,
            from_cashflow,
            from_equity: remaining,
        };

        self.cumulative_debt += slot.loan();
        self.properties.push(OwnedProperty {
            sequence: slot.sequence,
            property_type: slot.property_type.clone(),
            purchase_period: self.current_period,
            original_cost: slot.cost,
            loan_amount: slot.loan(),
            deposit_paid: deposit,
            yield_percent: slot.yield_percent,
            growth_curve: self.profile_curve.with_long_run(slot.growth_percent),
        });
        self.revalue();

        funding
    }

    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            period: self.current_period,
            cash_on_hand: self.cash_on_hand,
            savings_accrued: self.savings_accrued,
            net_cashflow_to_date: self.net_cashflow_to_date,
            cumulative_debt: self.cumulative_debt,
            portfolio_value: self.portfolio_value,
            equity: self.equity(),
            extractable_equity: extractable_equity(
                self.portfolio_value,
                self.cumulative_debt,
                self.equity_factor,
            ),
            annual_gross_rent: self.annual_gross_rent,
            properties_owned: self.properties.len(),
        }
    }
}

/// Move up to `remaining` out of a balance, never taking it below zero
fn take(balance: &mut Money, remaining: &mut Money) -> Money {
    let taken = (*balance).non_negative().min(*remaining);
    *balance -= taken;
    *remaining -= taken;
    taken
}
