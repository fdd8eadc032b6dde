//! Affordability tests
//!
//! A candidate purchase must pass three independent lending tests against the
//! current portfolio position:
//!
//! 1. **Deposit** - liquid funds plus extractable equity cover the deposit and
//!    the cash buffer.
//! 2. **Borrowing capacity** - total debt after the new loan stays within the
//!    lender's cap, which equity growth can extend.
//! 3. **Serviceability** - assessed salary and shaded rent cover a year of
//!    interest on the total debt.
//!
//! Every test reports a signed surplus so a failing evaluation also says by
//! how much it failed.

use crate::model::{
    AcquisitionSlot, AffordabilityReport, InvestmentProfile, Money, PortfolioSnapshot, TestKind,
    TestOutcome,
};

/// Share of portfolio value a lender will lend against when releasing equity
pub const MAX_EQUITY_LVR: f64 = 0.8;

/// The lender-facing parts of a profile, converted to ledger amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LendingTerms {
    pub borrowing_capacity: Money,
    pub deposit_buffer: Money,
    pub equity_factor: f64,
    pub base_salary: Money,
    pub salary_serviceability_multiplier: f64,
    pub serviceability_ratio: f64,
    pub rent_factor: f64,
    pub interest_rate_percent: f64,
}

impl LendingTerms {
    #[must_use]
    pub fn from_profile(profile: &InvestmentProfile) -> Self {
        Self {
            borrowing_capacity: Money::from_dollars(profile.borrowing_capacity),
            deposit_buffer: Money::from_dollars(profile.deposit_buffer),
            equity_factor: profile.equity_factor,
            base_salary: Money::from_dollars(profile.base_salary),
            salary_serviceability_multiplier: profile.salary_serviceability_multiplier,
            serviceability_ratio: profile.serviceability_ratio,
            rent_factor: profile.rent_factor,
            interest_rate_percent: profile.interest_rate_percent,
        }
    }

    /// Salary income a lender counts toward servicing debt each year
    #[must_use]
    pub fn assessed_salary(&self) -> Money {
        self.base_salary
            .scale(self.salary_serviceability_multiplier * self.serviceability_ratio)
    }
}

/// The purchase being tested
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub cost: Money,
    pub deposit_percent: f64,
    /// Gross rent the property would earn in its first year
    pub annual_rent: Money,
}

impl Candidate {
    #[must_use]
    pub fn deposit(&self) -> Money {
        self.cost.percent(self.deposit_percent)
    }

    #[must_use]
    pub fn loan(&self) -> Money {
        self.cost - self.deposit()
    }
}

impl From<&AcquisitionSlot> for Candidate {
    fn from(slot: &AcquisitionSlot) -> Self {
        Self {
            cost: slot.cost,
            deposit_percent: slot.deposit_percent,
            annual_rent: slot.annual_rent(),
        }
    }
}

/// Equity a lender would release: value above the 80% lending line, less debt,
/// scaled by the equity factor
#[must_use]
pub fn extractable_equity(portfolio_value: Money, debt: Money, equity_factor: f64) -> Money {
    (portfolio_value.scale(MAX_EQUITY_LVR) - debt)
        .non_negative()
        .scale(equity_factor)
}

/// Funds the deposit test can draw on
#[must_use]
pub fn available_funds(position: &PortfolioSnapshot) -> Money {
    position.cash_on_hand
        + position.savings_accrued
        + position.net_cashflow_to_date.non_negative()
        + position.extractable_equity
}

/// Deposit test: funds cover the deposit plus the buffer
#[must_use]
pub fn deposit_test(
    candidate: &Candidate,
    position: &PortfolioSnapshot,
    terms: &LendingTerms,
) -> TestOutcome {
    TestOutcome::new(
        TestKind::Deposit,
        available_funds(position),
        candidate.deposit() + terms.deposit_buffer,
    )
}

/// Borrowing-capacity test: debt after the new loan stays under the cap
#[must_use]
pub fn borrowing_test(
    candidate: &Candidate,
    position: &PortfolioSnapshot,
    terms: &LendingTerms,
) -> TestOutcome {
    let effective_capacity =
        terms.borrowing_capacity + position.extractable_equity.scale(terms.equity_factor);
    TestOutcome::new(
        TestKind::BorrowingCapacity,
        effective_capacity,
        position.cumulative_debt + candidate.loan(),
    )
}

/// Serviceability test: a year of interest on total debt is covered by
/// assessed salary plus shaded rent, including the candidate's own rent
#[must_use]
pub fn serviceability_test(
    candidate: &Candidate,
    position: &PortfolioSnapshot,
    terms: &LendingTerms,
) -> TestOutcome {
    let gross_rent = position.annual_gross_rent + candidate.annual_rent;
    let capacity = terms.assessed_salary() + gross_rent.scale(terms.rent_factor);
    let required = (position.cumulative_debt + candidate.loan()).percent(terms.interest_rate_percent);
    TestOutcome::new(TestKind::Serviceability, capacity, required)
}

/// Run all three tests for a candidate
#[must_use]
pub fn evaluate(
    candidate: &Candidate,
    position: &PortfolioSnapshot,
    terms: &LendingTerms,
) -> AffordabilityReport {
    AffordabilityReport {
        deposit: deposit_test(candidate, position, terms),
        borrowing: borrowing_test(candidate, position, terms),
        serviceability: serviceability_test(candidate, position, terms),
    }
}
