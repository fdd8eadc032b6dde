//! Bottleneck detection over a completed run.

use serde::{Deserialize, Serialize};

use super::suggestions::{Suggestion, suggest};
use crate::model::{
    AcquisitionStatus, InvestmentProfile, Money, SimulationOutput, TestKind, TimelineResult,
};

/// Relative shortfall above which a plan is considered badly out of reach
pub const MAJOR_SHORTFALL_RATIO: f64 = 0.5;

/// How far a plan is from fully resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Every slot was bought
    None,
    /// Slots remain but nothing failed at the end: only the horizon binds
    Minor,
    Moderate,
    /// The binding test is short by more than half of what it requires
    Major,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Major => "major",
        }
    }
}

/// Shortfalls of one test summed over every failing evaluation in the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortfallAggregate {
    pub kind: TestKind,
    pub failures: u32,
    pub total_shortfall: Money,
    pub worst_shortfall: Money,
}

/// What held a plan back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleneckKind {
    Test(TestKind),
    Horizon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub kind: BottleneckKind,
    pub message: String,
    /// Shortfall at the end of the horizon (zero for the horizon itself)
    pub shortfall: Money,
    /// Shortfall as a fraction of what the test requires
    pub relative_shortfall: f64,
    /// Periods in which this constraint failed
    pub failures: u32,
}

/// Advisory summary for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilitySummary {
    pub severity: Severity,
    pub unresolved_slots: usize,
    pub aggregates: Vec<ShortfallAggregate>,
    /// Binding constraints, dominant first
    pub bottlenecks: Vec<Bottleneck>,
    /// Remediation steps ordered by priority
    pub suggestions: Vec<Suggestion>,
}

impl FeasibilitySummary {
    #[must_use]
    pub fn dominant(&self) -> Option<&Bottleneck> {
        self.bottlenecks.first()
    }
}

/// Sum shortfalls per test over every period's pending evaluation
#[must_use]
pub fn aggregate_shortfalls(output: &SimulationOutput) -> Vec<ShortfallAggregate> {
    TestKind::ALL
        .iter()
        .filter_map(|&kind| {
            let shortfalls: Vec<Money> = output
                .periods
                .iter()
                .filter_map(|row| row.pending)
                .map(|pending| *pending.report.outcome(kind))
                .filter(|outcome| !outcome.passed)
                .map(|outcome| outcome.shortfall())
                .collect();
            if shortfalls.is_empty() {
                return None;
            }
            Some(ShortfallAggregate {
                kind,
                failures: shortfalls.len() as u32,
                total_shortfall: shortfalls.iter().sum(),
                worst_shortfall: shortfalls.iter().copied().max().unwrap_or_default(),
            })
        })
        .collect()
}

/// Identify the binding constraint of a run and suggest how to relieve it
///
/// Reads the output and profile only; neither is modified.
#[must_use]
pub fn analyze(output: &SimulationOutput, profile: &InvestmentProfile) -> FeasibilitySummary {
    let aggregates = aggregate_shortfalls(output);
    let unresolved: Vec<&TimelineResult> = output.unresolved().collect();

    let Some(head) = unresolved.first() else {
        return FeasibilitySummary {
            severity: Severity::None,
            unresolved_slots: 0,
            aggregates,
            bottlenecks: Vec::new(),
            suggestions: Vec::new(),
        };
    };

    let failures_of = |kind: TestKind| {
        aggregates
            .iter()
            .find(|a| a.kind == kind)
            .map_or(0, |a| a.failures)
    };

    let mut bottlenecks: Vec<Bottleneck> = head
        .tests
        .iter()
        .flat_map(|report| report.failures().copied().collect::<Vec<_>>())
        .map(|outcome| Bottleneck {
            kind: BottleneckKind::Test(outcome.kind),
            message: format!(
                "{} short by {} for {} at the end of the horizon",
                outcome.kind.label(),
                outcome.shortfall(),
                head.slot.label()
            ),
            shortfall: outcome.shortfall(),
            relative_shortfall: outcome.relative_shortfall(),
            failures: failures_of(outcome.kind),
        })
        .collect();
    bottlenecks.sort_by(|a, b| b.relative_shortfall.total_cmp(&a.relative_shortfall));

    let severity = match bottlenecks.first() {
        None => Severity::Minor,
        Some(dominant) if dominant.relative_shortfall > MAJOR_SHORTFALL_RATIO => Severity::Major,
        Some(_) => Severity::Moderate,
    };

    if bottlenecks.is_empty() {
        bottlenecks.push(Bottleneck {
            kind: BottleneckKind::Horizon,
            message: format!(
                "{} purchase(s) still queued when the {}-year horizon ends",
                unresolved.len(),
                profile.timeline_years
            ),
            shortfall: Money::ZERO,
            relative_shortfall: 0.0,
            failures: 0,
        });
    }

    tracing::debug!(
        severity = severity.label(),
        unresolved = unresolved.len(),
        "feasibility analyzed"
    );

    let waiting = head.status == AcquisitionStatus::Waiting;
    let suggestions = suggest(&bottlenecks, profile, unresolved.len(), waiting);

    FeasibilitySummary {
        severity,
        unresolved_slots: unresolved.len(),
        aggregates,
        bottlenecks,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SuggestionAction;
    use crate::model::{PropertyCatalog, Selection};
    use crate::queue::build_queue;
    use crate::simulation::{TimelineSimulator, simulate};

    fn run(profile: &InvestmentProfile, selections: &[Selection]) -> SimulationOutput {
        simulate(profile, selections, &PropertyCatalog::standard()).unwrap()
    }

    #[test]
    fn test_resolved_plan_has_no_bottleneck() {
        let profile = InvestmentProfile::default();
        let output = run(&profile, &[Selection::new("unit", 1)]);
        let summary = analyze(&output, &profile);

        assert_eq!(summary.severity, Severity::None);
        assert!(summary.bottlenecks.is_empty());
        assert!(summary.suggestions.is_empty());
        // Periods 1 and 2 still failed the deposit test
        assert_eq!(summary.aggregates.len(), 1);
        assert_eq!(summary.aggregates[0].kind, TestKind::Deposit);
        assert_eq!(summary.aggregates[0].failures, 2);
        assert_eq!(summary.aggregates[0].worst_shortfall, Money::from_dollars(13_000.0));
    }

    #[test]
    fn test_deposit_bottleneck_suggests_pool_target() {
        let profile = InvestmentProfile {
            annual_savings: 0.0,
            timeline_years: 1,
            ..Default::default()
        };
        let output = run(&profile, &[Selection::new("house", 1)]);
        let summary = analyze(&output, &profile);

        assert_eq!(summary.unresolved_slots, 1);
        let dominant = summary.dominant().unwrap();
        assert_eq!(dominant.kind, BottleneckKind::Test(TestKind::Deposit));
        assert!(dominant.shortfall > Money::ZERO);

        let first = &summary.suggestions[0];
        assert_eq!(first.priority, 1);
        assert_eq!(first.action, SuggestionAction::IncreaseDepositPool);
        assert_eq!(first.current_value, profile.deposit_pool);
        // Target covers the shortfall and lands on a whole thousand
        let gap = first.target_value - profile.deposit_pool;
        assert!(gap >= dominant.shortfall.as_dollars());
        assert_eq!(gap % 1_000.0, 0.0);
    }

    #[test]
    fn test_large_shortfall_is_major() {
        let profile = InvestmentProfile {
            deposit_pool: 0.0,
            annual_savings: 0.0,
            timeline_years: 1,
            ..Default::default()
        };
        let output = run(&profile, &[Selection::new("commercial", 1)]);
        let summary = analyze(&output, &profile);

        assert_eq!(summary.severity, Severity::Major);
        assert!(summary.dominant().unwrap().relative_shortfall > MAJOR_SHORTFALL_RATIO);
    }

    #[test]
    fn test_horizon_only_is_minor() {
        // No period runs, so nothing was ever tested
        let profile = InvestmentProfile {
            deposit_pool: 2_000_000.0,
            borrowing_capacity: 5_000_000.0,
            base_salary: 1_000_000.0,
            timeline_years: 0,
            ..Default::default()
        };
        let output = run(&profile, &[Selection::new("unit", 2)]);
        let summary = analyze(&output, &profile);

        assert_eq!(summary.severity, Severity::Minor);
        assert_eq!(summary.unresolved_slots, 2);
        assert_eq!(summary.dominant().unwrap().kind, BottleneckKind::Horizon);
        let extend = &summary.suggestions[0];
        assert_eq!(extend.action, SuggestionAction::ExtendTimeline);
        assert_eq!(extend.target_value, 1.0);
    }

    #[test]
    fn test_purchase_cap_at_horizon_is_minor() {
        // Every test passes, but one purchase per period fits only two of three
        let profile = InvestmentProfile {
            deposit_pool: 2_000_000.0,
            borrowing_capacity: 5_000_000.0,
            base_salary: 1_000_000.0,
            timeline_years: 1,
            max_purchases_per_period: 1,
            ..Default::default()
        };
        let output = run(&profile, &[Selection::new("unit", 3)]);

        assert_eq!(output.periods.len(), 2);
        assert!(output.periods.iter().all(|row| row.pending.is_none()));
        let head = &output.timeline[2];
        assert_eq!(head.status, AcquisitionStatus::Waiting);
        assert!(head.tests.is_none());

        let summary = analyze(&output, &profile);

        assert_eq!(summary.severity, Severity::Minor);
        assert_eq!(summary.unresolved_slots, 1);
        assert!(summary.aggregates.is_empty());
        assert_eq!(summary.bottlenecks.len(), 1);
        assert_eq!(summary.dominant().unwrap().kind, BottleneckKind::Horizon);
        assert_eq!(summary.suggestions.len(), 1);
        let extend = &summary.suggestions[0];
        assert_eq!(extend.action, SuggestionAction::ExtendTimeline);
        assert_eq!(extend.target_value, 2.0);
    }

    #[test]
    fn test_analyze_accepts_unvalidated_purchase_limit() {
        let profile = InvestmentProfile {
            timeline_years: 0,
            max_purchases_per_period: u32::MAX,
            ..Default::default()
        };
        let slots = build_queue(&[Selection::new("unit", 1)], &PropertyCatalog::standard()).unwrap();
        let output = TimelineSimulator::new(&profile, slots).run();

        let summary = analyze(&output, &profile);

        assert_eq!(summary.severity, Severity::Minor);
        assert_eq!(summary.suggestions[0].action, SuggestionAction::ExtendTimeline);
        assert_eq!(summary.suggestions[0].target_value, 1.0);
    }

    #[test]
    fn test_analysis_does_not_modify_output() {
        let profile = InvestmentProfile {
            timeline_years: 2,
            ..Default::default()
        };
        let output = run(&profile, &[Selection::new("house", 2)]);
        let before = output.clone();
        let _ = analyze(&output, &profile);
        assert_eq!(output, before);
    }
}
