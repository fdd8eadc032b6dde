//! Portfolio ratios derived from simulation output
//!
//! Everything here is a pure function of [`PeriodBreakdown`] rows. Nothing
//! re-derives portfolio state; the simulator output is the single source of
//! truth. Ratios whose denominator is zero are reported as 0 rather than NaN
//! or infinity.

use serde::{Deserialize, Serialize};

use crate::model::{Money, PeriodBreakdown, SimulationOutput};

/// Ratios for one period, all in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub period: u32,
    /// Loan-to-value: debt / portfolio value
    pub lvr: f64,
    /// Debt-service ratio: loan interest / gross rental
    pub dsr: f64,
    /// Net cashflow / cost purchased, for purchase periods only
    pub self_funding_efficiency: Option<f64>,
    /// Equity / portfolio value
    pub equity_recycling: f64,
}

/// Derive the ratios for one period row
#[must_use]
pub fn period_metrics(row: &PeriodBreakdown) -> PeriodMetrics {
    PeriodMetrics {
        period: row.period,
        lvr: percent(row.debt, row.portfolio_value),
        dsr: percent(row.cashflow.loan_interest, row.cashflow.gross_rental),
        self_funding_efficiency: row
            .is_purchase_period()
            .then(|| percent(row.cashflow.net, row.purchased_cost)),
        equity_recycling: percent(row.equity, row.portfolio_value),
    }
}

/// Ratios for every period of a run
#[must_use]
pub fn timeline_metrics(output: &SimulationOutput) -> Vec<PeriodMetrics> {
    output.periods.iter().map(period_metrics).collect()
}

/// Plan-level figures for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub purchases: usize,
    pub unresolved: usize,
    pub first_purchase_period: Option<u32>,
    pub last_purchase_period: Option<u32>,
    pub total_purchase_cost: Money,
    pub final_portfolio_value: Money,
    pub final_debt: Money,
    pub final_equity: Money,
    pub final_lvr: f64,
    pub peak_lvr: f64,
    /// Mean DSR over periods that earned rent
    pub average_dsr: f64,
    pub total_net_cashflow: Money,
}

#[must_use]
pub fn plan_summary(output: &SimulationOutput) -> PlanSummary {
    let metrics = timeline_metrics(output);
    let purchased_periods = output.timeline.iter().filter_map(|t| t.period);

    let rent_earning: Vec<f64> = output
        .periods
        .iter()
        .zip(&metrics)
        .filter(|(row, _)| !row.cashflow.gross_rental.is_zero())
        .map(|(_, m)| m.dsr)
        .collect();
    let average_dsr = if rent_earning.is_empty() {
        0.0
    } else {
        rent_earning.iter().sum::<f64>() / rent_earning.len() as f64
    };

    let last = output.final_period();

    PlanSummary {
        purchases: output.purchased_count(),
        unresolved: output.unresolved().count(),
        first_purchase_period: purchased_periods.clone().min(),
        last_purchase_period: purchased_periods.max(),
        total_purchase_cost: output
            .timeline
            .iter()
            .filter(|t| t.is_feasible())
            .map(|t| t.slot.cost)
            .sum(),
        final_portfolio_value: last.map_or(Money::ZERO, |r| r.portfolio_value),
        final_debt: last.map_or(Money::ZERO, |r| r.debt),
        final_equity: last.map_or(Money::ZERO, |r| r.equity),
        final_lvr: metrics.last().map_or(0.0, |m| m.lvr),
        peak_lvr: metrics.iter().map(|m| m.lvr).fold(0.0, f64::max),
        average_dsr,
        total_net_cashflow: last.map_or(Money::ZERO, |r| r.cumulative_net_cashflow),
    }
}

fn percent(numerator: Money, denominator: Money) -> f64 {
    numerator.ratio(denominator) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AcquisitionStatus, CashflowBreakdown};

    fn row(debt: f64, value: f64, interest: f64, rental: f64) -> PeriodBreakdown {
        let debt = Money::from_dollars(debt);
        let value = Money::from_dollars(value);
        PeriodBreakdown {
            period: 1,
            date: jiff::civil::date(2025, 7, 1),
            status: AcquisitionStatus::Waiting,
            portfolio_value: value,
            debt,
            equity: value - debt,
            available_funds: Money::ZERO,
            cashflow: CashflowBreakdown {
                gross_rental: Money::from_dollars(rental),
                loan_interest: Money::from_dollars(interest),
                expenses: Money::ZERO,
                net: Money::from_dollars(rental - interest),
            },
            cumulative_net_cashflow: Money::ZERO,
            properties_owned: 1,
            purchased: Vec::new(),
            purchased_cost: Money::ZERO,
            pending: None,
        }
    }

    #[test]
    fn test_ratios() {
        let metrics = period_metrics(&row(300_000.0, 400_000.0, 9_000.0, 10_000.0));
        assert!((metrics.lvr - 75.0).abs() < 1e-9);
        assert!((metrics.dsr - 90.0).abs() < 1e-9);
        assert!((metrics.equity_recycling - 25.0).abs() < 1e-9);
        assert_eq!(metrics.self_funding_efficiency, None);
    }

    #[test]
    fn test_zero_denominators_give_zero() {
        let metrics = period_metrics(&row(0.0, 0.0, 500.0, 0.0));
        assert_eq!(metrics.lvr, 0.0);
        assert_eq!(metrics.dsr, 0.0);
        assert_eq!(metrics.equity_recycling, 0.0);
    }

    #[test]
    fn test_self_funding_only_for_purchase_periods() {
        let mut purchase = row(280_000.0, 350_000.0, 0.0, 3_500.0);
        purchase.purchased = vec![0];
        purchase.purchased_cost = Money::from_dollars(350_000.0);

        let metrics = period_metrics(&purchase);
        let efficiency = metrics.self_funding_efficiency.unwrap();
        assert!((efficiency - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_empty_output() {
        let output = SimulationOutput {
            timeline: Vec::new(),
            periods: Vec::new(),
        };
        let summary = plan_summary(&output);
        assert_eq!(summary.purchases, 0);
        assert_eq!(summary.first_purchase_period, None);
        assert_eq!(summary.final_portfolio_value, Money::ZERO);
        assert_eq!(summary.peak_lvr, 0.0);
        assert_eq!(summary.average_dsr, 0.0);
    }
}
