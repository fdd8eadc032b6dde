//! Simulation results
//!
//! Output of a run: one [`TimelineResult`] per acquisition slot and one
//! [`PeriodBreakdown`] per simulated period. Consumers (charts, tables,
//! report export) read these directly and never re-derive finance logic.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::selection::AcquisitionSlot;

/// The three lending constraints a purchase must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestKind {
    Deposit,
    BorrowingCapacity,
    Serviceability,
}

impl TestKind {
    pub const ALL: [TestKind; 3] = [
        TestKind::Deposit,
        TestKind::BorrowingCapacity,
        TestKind::Serviceability,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TestKind::Deposit => "Deposit",
            TestKind::BorrowingCapacity => "Borrowing capacity",
            TestKind::Serviceability => "Serviceability",
        }
    }
}

/// Result of one affordability test
///
/// `surplus` is signed: negative values are the shortfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub kind: TestKind,
    pub passed: bool,
    /// What the investor has for this test
    pub available: Money,
    /// What the purchase needs
    pub required: Money,
    pub surplus: Money,
}

impl TestOutcome {
    #[must_use]
    pub fn new(kind: TestKind, available: Money, required: Money) -> Self {
        Self {
            kind,
            passed: available >= required,
            available,
            required,
            surplus: available - required,
        }
    }

    /// Magnitude of the shortfall, zero when the test passed
    #[must_use]
    pub fn shortfall(&self) -> Money {
        (-self.surplus).non_negative()
    }

    /// Shortfall as a fraction of the requirement
    #[must_use]
    pub fn relative_shortfall(&self) -> f64 {
        self.shortfall().ratio(self.required)
    }
}

/// All three tests for one candidate purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityReport {
    pub deposit: TestOutcome,
    pub borrowing: TestOutcome,
    pub serviceability: TestOutcome,
}

impl AffordabilityReport {
    /// Purchasable only when every test passes
    #[must_use]
    pub fn passed(&self) -> bool {
        self.deposit.passed && self.borrowing.passed && self.serviceability.passed
    }

    #[must_use]
    pub fn outcomes(&self) -> [&TestOutcome; 3] {
        [&self.deposit, &self.borrowing, &self.serviceability]
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes().into_iter().filter(|o| !o.passed)
    }

    #[must_use]
    pub fn outcome(&self, kind: TestKind) -> &TestOutcome {
        match kind {
            TestKind::Deposit => &self.deposit,
            TestKind::BorrowingCapacity => &self.borrowing,
            TestKind::Serviceability => &self.serviceability,
        }
    }

    /// Status a failed evaluation implies for the period
    #[must_use]
    pub fn deferral_status(&self) -> AcquisitionStatus {
        if self.borrowing.passed {
            AcquisitionStatus::Waiting
        } else {
            AcquisitionStatus::Blocked
        }
    }
}

/// Where a slot or period stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquisitionStatus {
    Purchased,
    /// Held up by the borrowing-capacity cap
    Blocked,
    /// Waiting for funds or serviceability to build up
    Waiting,
}

impl AcquisitionStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AcquisitionStatus::Purchased => "purchased",
            AcquisitionStatus::Blocked => "blocked",
            AcquisitionStatus::Waiting => "waiting",
        }
    }
}

/// Portfolio position at a point in the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub period: u32,
    /// Remaining starting deposit pool
    pub cash_on_hand: Money,
    /// Savings accrued and not yet spent on deposits
    pub savings_accrued: Money,
    /// Net rental cashflow to date, less what deposits consumed (may be negative)
    pub net_cashflow_to_date: Money,
    pub cumulative_debt: Money,
    pub portfolio_value: Money,
    pub equity: Money,
    pub extractable_equity: Money,
    /// Gross rent the portfolio earns over a year at current values
    pub annual_gross_rent: Money,
    pub properties_owned: usize,
}

/// How a committed deposit was paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositFunding {
    pub from_cash: Money,
    pub from_savings: Money,
    pub from_cashflow: Money,
    /// Notional equity draw; not deducted from any cash balance
    pub from_equity: Money,
}

impl DepositFunding {
    #[must_use]
    pub fn total(&self) -> Money {
        self.from_cash + self.from_savings + self.from_cashflow + self.from_equity
    }
}

/// Outcome for one acquisition slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResult {
    pub slot: AcquisitionSlot,
    /// Purchase period, `None` when infeasible within the horizon
    pub period: Option<u32>,
    pub date: Option<jiff::civil::Date>,
    pub status: AcquisitionStatus,
    /// Position immediately after the purchase
    pub snapshot: Option<PortfolioSnapshot>,
    /// The passing evaluation for purchased slots, the last failing one for
    /// the slot left at the head of the queue, `None` for slots never reached
    pub tests: Option<AffordabilityReport>,
    pub funding: Option<DepositFunding>,
}

impl TimelineResult {
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.period.is_some()
    }
}

/// Rental cashflow for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowBreakdown {
    pub gross_rental: Money,
    pub loan_interest: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Evaluation of the slot that stopped purchasing in a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvaluation {
    pub sequence: usize,
    pub report: AffordabilityReport,
}

/// One row of the portfolio trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub period: u32,
    pub date: jiff::civil::Date,
    pub status: AcquisitionStatus,
    pub portfolio_value: Money,
    pub debt: Money,
    pub equity: Money,
    /// Funds the deposit test would see at the end of the period
    pub available_funds: Money,
    pub cashflow: CashflowBreakdown,
    pub cumulative_net_cashflow: Money,
    pub properties_owned: usize,
    /// Sequences of slots bought this period
    pub purchased: Vec<usize>,
    pub purchased_cost: Money,
    /// Why the next slot was not bought, if one was pending
    pub pending: Option<PendingEvaluation>,
}

impl PeriodBreakdown {
    #[must_use]
    pub fn is_purchase_period(&self) -> bool {
        !self.purchased.is_empty()
    }

    /// Whole years elapsed at the end of this period
    #[must_use]
    pub fn year(&self) -> f64 {
        f64::from(self.period) / f64::from(super::profile::PERIODS_PER_YEAR)
    }
}

/// Complete output of [`simulate`](crate::simulation::simulate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub timeline: Vec<TimelineResult>,
    pub periods: Vec<PeriodBreakdown>,
}

impl SimulationOutput {
    #[must_use]
    pub fn purchased_count(&self) -> usize {
        self.timeline.iter().filter(|t| t.is_feasible()).count()
    }

    /// Slots that never resolved within the horizon
    pub fn unresolved(&self) -> impl Iterator<Item = &TimelineResult> {
        self.timeline.iter().filter(|t| !t.is_feasible())
    }

    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.timeline.iter().all(TimelineResult::is_feasible)
    }

    #[must_use]
    pub fn final_period(&self) -> Option<&PeriodBreakdown> {
        self.periods.last()
    }

    /// Find the period row for a given period number
    #[must_use]
    pub fn period(&self, period: u32) -> Option<&PeriodBreakdown> {
        // Rows are dense and 1-based
        let index = period.checked_sub(1)? as usize;
        self.periods.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: TestKind, available: i64, required: i64) -> TestOutcome {
        TestOutcome::new(kind, Money::from_cents(available), Money::from_cents(required))
    }

    #[test]
    fn test_outcome_surplus_and_shortfall() {
        let passing = outcome(TestKind::Deposit, 1_000, 400);
        assert!(passing.passed);
        assert_eq!(passing.surplus, Money::from_cents(600));
        assert_eq!(passing.shortfall(), Money::ZERO);

        let failing = outcome(TestKind::Deposit, 300, 400);
        assert!(!failing.passed);
        assert_eq!(failing.surplus, Money::from_cents(-100));
        assert_eq!(failing.shortfall(), Money::from_cents(100));
        assert!((failing.relative_shortfall() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_exact_requirement_passes() {
        assert!(outcome(TestKind::Serviceability, 500, 500).passed);
    }

    #[test]
    fn test_deferral_status_depends_on_borrowing() {
        let report = AffordabilityReport {
            deposit: outcome(TestKind::Deposit, 0, 10),
            borrowing: outcome(TestKind::BorrowingCapacity, 10, 0),
            serviceability: outcome(TestKind::Serviceability, 10, 0),
        };
        assert!(!report.passed());
        assert_eq!(report.deferral_status(), AcquisitionStatus::Waiting);
        assert_eq!(report.failures().count(), 1);

        let capped = AffordabilityReport {
            borrowing: outcome(TestKind::BorrowingCapacity, 0, 10),
            ..report
        };
        assert_eq!(capped.deferral_status(), AcquisitionStatus::Blocked);
        assert_eq!(capped.outcome(TestKind::BorrowingCapacity).shortfall(), Money::from_cents(10));
    }

    #[test]
    fn test_funding_total() {
        let funding = DepositFunding {
            from_cash: Money::from_cents(1),
            from_savings: Money::from_cents(2),
            from_cashflow: Money::from_cents(3),
            from_equity: Money::from_cents(4),
        };
        assert_eq!(funding.total(), Money::from_cents(10));
    }
}
