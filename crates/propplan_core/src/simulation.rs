use std::collections::VecDeque;

use jiff::ToSpan;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::affordability::{Candidate, LendingTerms, available_funds, evaluate};
use crate::config::Scenario;
use crate::error::Result;
use crate::model::{
    AcquisitionSlot, AcquisitionStatus, InvestmentProfile, MAX_TIMELINE_YEARS, Money,
    PERIODS_PER_YEAR, PendingEvaluation, PeriodBreakdown, PropertyCatalog, Selection,
    SimulationOutput, TimelineResult,
};
use crate::queue::build_queue;
use crate::simulation_state::PortfolioState;

/// Months covered by one period
const PERIOD_MONTHS: u32 = 12 / PERIODS_PER_YEAR;

/// Run the acquisition timeline for one profile and selection
///
/// Validates the profile and catalog and builds the purchase queue before any
/// period runs; a configuration error means nothing was simulated. Slots that
/// never become affordable are reported as infeasible, not as errors.
///
/// The result depends only on the arguments: identical inputs always produce
/// identical output.
pub fn simulate(
    profile: &InvestmentProfile,
    selections: &[Selection],
    catalog: &PropertyCatalog,
) -> Result<SimulationOutput> {
    profile.validate()?;
    catalog.validate()?;
    let slots = build_queue(selections, catalog)?;
    Ok(TimelineSimulator::new(profile, slots).run())
}

/// Simulate several independent scenarios
///
/// Runs share nothing, so with the `parallel` feature they execute on the
/// rayon pool. Results are returned in input order.
#[cfg(feature = "parallel")]
pub fn compare_scenarios(scenarios: &[Scenario]) -> Vec<Result<SimulationOutput>> {
    scenarios.par_iter().map(Scenario::simulate).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn compare_scenarios(scenarios: &[Scenario]) -> Vec<Result<SimulationOutput>> {
    scenarios.iter().map(Scenario::simulate).collect()
}

/// Lifecycle of a [`TimelineSimulator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    Idle,
    Running,
    Completed,
}

/// Period-by-period acquisition scheduler
///
/// Owns the portfolio state and the FIFO slot queue for a single run. Each
/// [`step`](Self::step) advances one period: resources accrue, the head of
/// the queue is tested, and it is either bought or left waiting. Slots are
/// never reordered.
#[derive(Debug)]
pub struct TimelineSimulator {
    phase: SimulationPhase,
    total_periods: u32,
    max_purchases_per_period: u32,
    start_date: jiff::civil::Date,
    terms: LendingTerms,
    state: PortfolioState,
    queue: VecDeque<AcquisitionSlot>,
    /// Last failing evaluation of the current queue head
    last_failure: Option<PendingEvaluation>,
    timeline: Vec<TimelineResult>,
    periods: Vec<PeriodBreakdown>,
}

impl TimelineSimulator {
    /// Create a simulator for an already validated profile
    #[must_use]
    pub fn new(profile: &InvestmentProfile, slots: Vec<AcquisitionSlot>) -> Self {
        let total_periods = profile.total_periods();
        Self {
            phase: SimulationPhase::Idle,
            total_periods,
            max_purchases_per_period: profile.max_purchases_per_period,
            start_date: profile.start_date,
            terms: LendingTerms::from_profile(profile),
            state: PortfolioState::from_profile(profile),
            timeline: Vec::with_capacity(slots.len()),
            queue: slots.into(),
            last_failure: None,
            periods: Vec::with_capacity(
                total_periods.min(MAX_TIMELINE_YEARS * PERIODS_PER_YEAR) as usize,
            ),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &PortfolioState {
        &self.state
    }

    /// Slots still waiting to be bought
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Simulate the next period, returning its row
    ///
    /// Returns `None` once the horizon has been reached.
    pub fn step(&mut self) -> Option<&PeriodBreakdown> {
        match self.phase {
            SimulationPhase::Completed => return None,
            SimulationPhase::Idle => {
                tracing::debug!(
                    periods = self.total_periods,
                    slots = self.queue.len(),
                    "timeline simulation started"
                );
                self.phase = SimulationPhase::Running;
            }
            SimulationPhase::Running => {}
        }

        if self.state.current_period >= self.total_periods {
            self.phase = SimulationPhase::Completed;
            return None;
        }

        let cashflow = self.state.advance();
        let period = self.state.current_period;
        let date = self.period_date(period);

        let mut purchased = Vec::new();
        let mut purchased_cost = Money::ZERO;
        let mut pending = None;

        while (purchased.len() as u32) < self.max_purchases_per_period {
            let Some(head) = self.queue.front() else {
                break;
            };

            let report = evaluate(&Candidate::from(head), &self.state.snapshot(), &self.terms);
            if !report.passed() {
                tracing::trace!(
                    period,
                    slot = %head.label(),
                    deposit_surplus = %report.deposit.surplus,
                    borrowing_surplus = %report.borrowing.surplus,
                    serviceability_surplus = %report.serviceability.surplus,
                    "acquisition deferred"
                );
                pending = Some(PendingEvaluation {
                    sequence: head.sequence,
                    report,
                });
                break;
            }

            let Some(slot) = self.queue.pop_front() else {
                break;
            };
            let funding = self.state.commit(&slot);
            let snapshot = self.state.snapshot();

            tracing::debug!(
                period,
                slot = %slot.label(),
                cost = %slot.cost,
                debt = %snapshot.cumulative_debt,
                equity_draw = %funding.from_equity,
                "acquisition committed"
            );

            purchased.push(slot.sequence);
            purchased_cost += slot.cost;
            self.last_failure = None;
            self.timeline.push(TimelineResult {
                slot,
                period: Some(period),
                date: Some(date),
                status: AcquisitionStatus::Purchased,
                snapshot: Some(snapshot),
                tests: Some(report),
                funding: Some(funding),
            });
        }

        if pending.is_some() {
            self.last_failure = pending;
        }

        let status = if !purchased.is_empty() {
            AcquisitionStatus::Purchased
        } else {
            pending.map_or(AcquisitionStatus::Waiting, |p| p.report.deferral_status())
        };

        let snapshot = self.state.snapshot();
        tracing::trace!(
            period,
            status = status.label(),
            value = %snapshot.portfolio_value,
            debt = %snapshot.cumulative_debt,
            net_cashflow = %cashflow.net,
            "period simulated"
        );
        self.periods.push(PeriodBreakdown {
            period,
            date,
            status,
            portfolio_value: snapshot.portfolio_value,
            debt: snapshot.cumulative_debt,
            equity: snapshot.equity,
            available_funds: available_funds(&snapshot),
            cashflow,
            cumulative_net_cashflow: self.state.cumulative_net_cashflow,
            properties_owned: snapshot.properties_owned,
            purchased,
            purchased_cost,
            pending,
        });

        self.periods.last()
    }

    /// Run to the horizon and collect the results
    ///
    /// Slots still queued at the horizon are infeasible. The queue head keeps
    /// its last failing evaluation; slots behind it were never tested.
    #[must_use]
    pub fn run(mut self) -> SimulationOutput {
        while self.step().is_some() {}

        let last_failure = self.last_failure;
        for slot in self.queue.drain(..) {
            let evaluation = last_failure.filter(|f| f.sequence == slot.sequence);
            tracing::debug!(slot = %slot.label(), "acquisition infeasible within horizon");
            self.timeline.push(TimelineResult {
                slot,
                period: None,
                date: None,
                status: evaluation
                    .map_or(AcquisitionStatus::Waiting, |e| e.report.deferral_status()),
                snapshot: None,
                tests: evaluation.map(|e| e.report),
                funding: None,
            });
        }

        tracing::debug!(
            periods = self.periods.len(),
            purchased = self.timeline.iter().filter(|t| t.is_feasible()).count(),
            slots = self.timeline.len(),
            "timeline simulation completed"
        );

        SimulationOutput {
            timeline: self.timeline,
            periods: self.periods,
        }
    }

    fn period_date(&self, period: u32) -> jiff::civil::Date {
        let months = i64::from(period) * i64::from(PERIOD_MONTHS);
        self.start_date.saturating_add(months.months())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_unit_profile() -> InvestmentProfile {
        InvestmentProfile {
            deposit_pool: 50_000.0,
            borrowing_capacity: 500_000.0,
            annual_savings: 24_000.0,
            timeline_years: 15,
            ..Default::default()
        }
    }

    #[test]
    fn test_phases() {
        let profile = InvestmentProfile {
            timeline_years: 1,
            ..Default::default()
        };
        let mut sim = TimelineSimulator::new(&profile, Vec::new());
        assert_eq!(sim.phase(), SimulationPhase::Idle);

        assert!(sim.step().is_some());
        assert_eq!(sim.phase(), SimulationPhase::Running);
        assert!(sim.step().is_some());
        assert!(sim.step().is_none());
        assert_eq!(sim.phase(), SimulationPhase::Completed);
        assert!(sim.step().is_none());
    }

    #[test]
    fn test_step_reports_waiting_then_purchase() {
        let catalog = PropertyCatalog::standard();
        let slots = build_queue(&[Selection::new("unit", 1)], &catalog).unwrap();
        let mut sim = TimelineSimulator::new(&single_unit_profile(), slots);

        let first = sim.step().unwrap().clone();
        assert_eq!(first.status, AcquisitionStatus::Waiting);
        let pending = first.pending.unwrap();
        assert_eq!(pending.sequence, 0);
        assert!(!pending.report.deposit.passed);
        assert_eq!(pending.report.deposit.surplus, Money::from_dollars(-13_000.0));

        let second = sim.step().unwrap().clone();
        assert_eq!(second.status, AcquisitionStatus::Waiting);
        assert_eq!(sim.pending(), 1);

        let third = sim.step().unwrap().clone();
        assert_eq!(third.status, AcquisitionStatus::Purchased);
        assert_eq!(third.purchased, vec![0]);
        assert!(third.pending.is_none());
        assert_eq!(sim.pending(), 0);
    }

    #[test]
    fn test_period_dates_advance_six_months() {
        let output = simulate(
            &InvestmentProfile {
                timeline_years: 1,
                ..Default::default()
            },
            &[],
            &PropertyCatalog::standard(),
        )
        .unwrap();

        assert_eq!(output.periods[0].date, jiff::civil::date(2025, 7, 1));
        assert_eq!(output.periods[1].date, jiff::civil::date(2026, 1, 1));
    }

    #[test]
    fn test_configuration_error_before_any_period() {
        let profile = InvestmentProfile {
            deposit_pool: -1.0,
            ..Default::default()
        };
        let result = simulate(&profile, &[Selection::new("unit", 1)], &PropertyCatalog::standard());
        assert!(result.is_err());
    }

    #[test]
    fn test_purchase_limit_per_period() {
        let profile = InvestmentProfile {
            deposit_pool: 2_000_000.0,
            borrowing_capacity: 5_000_000.0,
            base_salary: 1_000_000.0,
            timeline_years: 2,
            max_purchases_per_period: 2,
            ..Default::default()
        };
        let output = simulate(
            &profile,
            &[Selection::new("unit", 3)],
            &PropertyCatalog::standard(),
        )
        .unwrap();

        let periods: Vec<Option<u32>> = output.timeline.iter().map(|t| t.period).collect();
        assert_eq!(periods, vec![Some(1), Some(1), Some(2)]);
        assert_eq!(output.periods[0].purchased, vec![0, 1]);
        // Cap reached, so nothing was left failing at the head
        assert!(output.periods[0].pending.is_none());
    }
}
